//! Edit form model behind [`Dialog::EditGasto`].
//!
//! The form holds one text value per data column and turns them back into a
//! [`Gasto`] when saved. Only the amounts are parsed, every other field is
//! stored as typed.
//!
//! [`Dialog::EditGasto`]: crate::dialog::Dialog::EditGasto
use api_types::gasto::{Gasto, GastoId, ViaticoFlag};

use crate::{columns::Column, error::FormError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormField {
    pub column: Column,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GastoForm {
    id: GastoId,
    fields: Vec<FormField>,
    focus: usize,
    viatico: ViaticoFlag,
}

impl GastoForm {
    pub fn from_gasto(gasto: &Gasto) -> Self {
        let fields = Column::data()
            .map(|column| FormField {
                column,
                value: initial_value(column, gasto),
            })
            .collect();
        Self {
            id: gasto.id,
            fields,
            focus: 0,
            viatico: gasto.certificacion_viatico.clone(),
        }
    }

    pub fn id(&self) -> GastoId {
        self.id
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn focused_column(&self) -> Option<Column> {
        self.fields.get(self.focus).map(|field| field.column)
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    pub fn push(&mut self, ch: char) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.push(ch);
        }
    }

    pub fn pop(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.pop();
        }
    }

    pub fn value(&self, column: Column) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.column == column)
            .map(|field| field.value.as_str())
    }

    pub fn set(&mut self, column: Column, value: impl Into<String>) {
        if let Some(field) = self.fields.iter_mut().find(|field| field.column == column) {
            field.value = value.into();
        }
    }

    pub fn to_gasto(&self) -> Result<Gasto, FormError> {
        let mut gasto = Gasto {
            id: self.id,
            ..Gasto::default()
        };
        for field in &self.fields {
            assign(&mut gasto, field.column, &field.value, &self.viatico)?;
        }
        Ok(gasto)
    }
}

/// Amounts start from the stored value, not the two-decimal cell text.
fn initial_value(column: Column, gasto: &Gasto) -> String {
    match column {
        Column::Monto => gasto.monto.to_string(),
        Column::Monto2 => gasto.monto2.map(|value| value.to_string()).unwrap_or_default(),
        other => other.cell(gasto).into_owned(),
    }
}

fn assign(
    gasto: &mut Gasto,
    column: Column,
    value: &str,
    viatico: &ViaticoFlag,
) -> Result<(), FormError> {
    let text = value.to_string();
    match column {
        Column::TipoDocumento => gasto.tipo_documento = text,
        Column::NumeroDocumento => gasto.numero_documento = text,
        Column::Siaf => gasto.siaf = text,
        Column::ANombreDe => gasto.a_nombre_de = text,
        Column::Concepto => gasto.concepto = text,
        Column::Monto => {
            gasto.monto = parse_amount(column, value)?.ok_or(FormError::Required(column.key()))?
        }
        Column::Monto2 => gasto.monto2 = parse_amount(column, value)?,
        Column::Especifica => gasto.especifica = text,
        Column::Especifica2 => gasto.especifica2 = text,
        Column::Ff => gasto.ff = text,
        Column::Mes => gasto.mes = text,
        Column::FechaDevengado => gasto.fecha_devengado = text,
        Column::Proyecto => gasto.proyecto = text,
        Column::Meta => gasto.meta = text,
        Column::CertificacionViatico => gasto.certificacion_viatico = viatico.with_text(value),
        Column::Destino => gasto.destino = text,
        Column::FechaSalida => gasto.fecha_salida = text,
        Column::FechaRetorno => gasto.fecha_retorno = text,
        Column::Acciones => {}
    }
    Ok(())
}

fn parse_amount(column: Column, value: &str) -> Result<Option<f64>, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .map(Some)
        .ok_or_else(|| FormError::InvalidNumber {
            field: column.key(),
            value: value.to_string(),
        })
}
