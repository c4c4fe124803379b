//! Ordered columns of the gastos table.
//!
//! The column list is declared on its own and mapped field by field onto
//! [`Gasto`], so the order on screen never depends on how the record is
//! declared.
use std::{borrow::Cow, cmp::Ordering};

use api_types::gasto::Gasto;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Column {
    TipoDocumento,
    NumeroDocumento,
    Siaf,
    ANombreDe,
    Concepto,
    Monto,
    Monto2,
    Especifica,
    Especifica2,
    Ff,
    Mes,
    FechaDevengado,
    Proyecto,
    Meta,
    CertificacionViatico,
    Destino,
    FechaSalida,
    FechaRetorno,
    Acciones,
}

impl Column {
    /// Columns in left-to-right display order.
    pub const ALL: [Column; 19] = [
        Self::TipoDocumento,
        Self::NumeroDocumento,
        Self::Siaf,
        Self::ANombreDe,
        Self::Concepto,
        Self::Monto,
        Self::Monto2,
        Self::Especifica,
        Self::Especifica2,
        Self::Ff,
        Self::Mes,
        Self::FechaDevengado,
        Self::Proyecto,
        Self::Meta,
        Self::CertificacionViatico,
        Self::Destino,
        Self::FechaSalida,
        Self::FechaRetorno,
        Self::Acciones,
    ];

    /// Columns that carry record data, i.e. everything but the actions.
    pub fn data() -> impl Iterator<Item = Column> {
        Self::ALL.into_iter().filter(|column| column.is_data())
    }

    pub fn from_key(key: &str) -> Option<Column> {
        Self::ALL.into_iter().find(|column| column.key() == key)
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::TipoDocumento => "tipoDocumento",
            Self::NumeroDocumento => "numeroDocumento",
            Self::Siaf => "siaf",
            Self::ANombreDe => "aNombreDe",
            Self::Concepto => "concepto",
            Self::Monto => "monto",
            Self::Monto2 => "monto2",
            Self::Especifica => "especifica",
            Self::Especifica2 => "especifica2",
            Self::Ff => "ff",
            Self::Mes => "mes",
            Self::FechaDevengado => "fechaDevengado",
            Self::Proyecto => "proyecto",
            Self::Meta => "meta",
            Self::CertificacionViatico => "certificacionViatico",
            Self::Destino => "destino",
            Self::FechaSalida => "fechaSalida",
            Self::FechaRetorno => "fechaRetorno",
            Self::Acciones => "acciones",
        }
    }

    pub fn header(self) -> &'static str {
        match self {
            Self::TipoDocumento => "Tipo Doc.",
            Self::NumeroDocumento => "N° Documento",
            Self::Siaf => "SIAF",
            Self::ANombreDe => "A nombre de",
            Self::Concepto => "Concepto",
            Self::Monto => "Monto",
            Self::Monto2 => "Monto 2",
            Self::Especifica => "Específica",
            Self::Especifica2 => "Específica 2",
            Self::Ff => "FF",
            Self::Mes => "Mes",
            Self::FechaDevengado => "F. Devengado",
            Self::Proyecto => "Proyecto",
            Self::Meta => "Meta",
            Self::CertificacionViatico => "Cert. Viático",
            Self::Destino => "Destino",
            Self::FechaSalida => "F. Salida",
            Self::FechaRetorno => "F. Retorno",
            Self::Acciones => "Acciones",
        }
    }

    pub fn is_data(self) -> bool {
        self != Self::Acciones
    }

    pub fn is_sortable(self) -> bool {
        self.is_data()
    }

    /// Rendered cell text for `gasto`.
    pub fn cell(self, gasto: &Gasto) -> Cow<'_, str> {
        match self {
            Self::TipoDocumento => Cow::Borrowed(gasto.tipo_documento.as_str()),
            Self::NumeroDocumento => Cow::Borrowed(gasto.numero_documento.as_str()),
            Self::Siaf => Cow::Borrowed(gasto.siaf.as_str()),
            Self::ANombreDe => Cow::Borrowed(gasto.a_nombre_de.as_str()),
            Self::Concepto => Cow::Borrowed(gasto.concepto.as_str()),
            Self::Monto => Cow::Owned(format_amount(gasto.monto)),
            Self::Monto2 => gasto
                .monto2
                .map(|value| Cow::Owned(format_amount(value)))
                .unwrap_or(Cow::Borrowed("")),
            Self::Especifica => Cow::Borrowed(gasto.especifica.as_str()),
            Self::Especifica2 => Cow::Borrowed(gasto.especifica2.as_str()),
            Self::Ff => Cow::Borrowed(gasto.ff.as_str()),
            Self::Mes => Cow::Borrowed(gasto.mes.as_str()),
            Self::FechaDevengado => Cow::Borrowed(gasto.fecha_devengado.as_str()),
            Self::Proyecto => Cow::Borrowed(gasto.proyecto.as_str()),
            Self::Meta => Cow::Borrowed(gasto.meta.as_str()),
            Self::CertificacionViatico => Cow::Borrowed(gasto.certificacion_viatico.as_str()),
            Self::Destino => Cow::Borrowed(gasto.destino.as_str()),
            Self::FechaSalida => Cow::Borrowed(gasto.fecha_salida.as_str()),
            Self::FechaRetorno => Cow::Borrowed(gasto.fecha_retorno.as_str()),
            Self::Acciones => Cow::Borrowed(""),
        }
    }

    /// Value used to order rows by this column.
    pub fn sort_value(self, gasto: &Gasto) -> SortValue<'_> {
        match self {
            Self::Monto => SortValue::Number(Some(gasto.monto)),
            Self::Monto2 => SortValue::Number(gasto.monto2),
            other => {
                let text = other.cell(gasto);
                if text.chars().any(char::is_uppercase) {
                    SortValue::Text(Cow::Owned(text.to_lowercase()))
                } else {
                    SortValue::Text(text)
                }
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SortValue<'a> {
    Number(Option<f64>),
    Text(Cow<'a, str>),
}

impl SortValue<'_> {
    /// Missing numbers sort before any present one.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => match (a, b) {
                (Some(a), Some(b)) => a.total_cmp(b),
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

/// Amounts are shown with two decimals, as on the backend.
pub fn format_amount(value: f64) -> String {
    format!("{value:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Gasto {
        Gasto {
            id: 1,
            tipo_documento: "RH".to_string(),
            a_nombre_de: "María Quispe".to_string(),
            monto: 1250.5,
            monto2: None,
            fecha_retorno: "2024-05-02".to_string(),
            ..Gasto::default()
        }
    }

    #[test]
    fn order_matches_table_layout() {
        let keys = Column::ALL.iter().map(|c| c.key()).collect::<Vec<_>>();
        assert_eq!(
            keys,
            [
                "tipoDocumento",
                "numeroDocumento",
                "siaf",
                "aNombreDe",
                "concepto",
                "monto",
                "monto2",
                "especifica",
                "especifica2",
                "ff",
                "mes",
                "fechaDevengado",
                "proyecto",
                "meta",
                "certificacionViatico",
                "destino",
                "fechaSalida",
                "fechaRetorno",
                "acciones",
            ]
        );
    }

    #[test]
    fn from_key_inverts_key() {
        for column in Column::ALL {
            assert_eq!(Column::from_key(column.key()), Some(column));
        }
        assert_eq!(Column::from_key("id"), None);
    }

    #[test]
    fn actions_is_the_only_non_data_column() {
        assert_eq!(Column::data().count(), 18);
        assert!(!Column::Acciones.is_data());
        assert!(!Column::Acciones.is_sortable());
    }

    #[test]
    fn cells_map_explicit_fields() {
        let gasto = sample();
        assert_eq!(Column::TipoDocumento.cell(&gasto), "RH");
        assert_eq!(Column::ANombreDe.cell(&gasto), "María Quispe");
        assert_eq!(Column::Monto.cell(&gasto), "1250.50");
        assert_eq!(Column::Monto2.cell(&gasto), "");
        assert_eq!(Column::FechaRetorno.cell(&gasto), "2024-05-02");
        assert_eq!(Column::Acciones.cell(&gasto), "");
    }

    #[test]
    fn sort_values_compare_numbers_and_text() {
        let mut low = sample();
        low.monto = 9.0;
        let high = sample();
        assert_eq!(
            Column::Monto
                .sort_value(&low)
                .compare(&Column::Monto.sort_value(&high)),
            Ordering::Less
        );

        let mut with_second = sample();
        with_second.monto2 = Some(1.0);
        assert_eq!(
            Column::Monto2
                .sort_value(&high)
                .compare(&Column::Monto2.sort_value(&with_second)),
            Ordering::Less
        );

        let mut lower = sample();
        lower.a_nombre_de = "ana".to_string();
        let mut upper = sample();
        upper.a_nombre_de = "Beto".to_string();
        assert_eq!(
            Column::ANombreDe
                .sort_value(&lower)
                .compare(&Column::ANombreDe.sort_value(&upper)),
            Ordering::Less
        );
    }
}
