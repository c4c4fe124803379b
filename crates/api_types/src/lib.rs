use serde::{Deserialize, Deserializer, Serialize};

pub mod gasto {
    use super::*;

    /// Identifier assigned by the backend.
    pub type GastoId = i64;

    /// An expense record as exchanged with the backend.
    ///
    /// Every field is a plain scalar. Text fields that are missing or `null`
    /// on the wire decode as empty strings, dates are kept as the strings the
    /// backend sends.
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase", default)]
    pub struct Gasto {
        pub id: GastoId,
        #[serde(deserialize_with = "null_as_default")]
        pub tipo_documento: String,
        #[serde(deserialize_with = "null_as_default")]
        pub numero_documento: String,
        #[serde(deserialize_with = "null_as_default")]
        pub siaf: String,
        #[serde(deserialize_with = "null_as_default")]
        pub a_nombre_de: String,
        #[serde(deserialize_with = "null_as_default")]
        pub concepto: String,
        #[serde(deserialize_with = "amount")]
        pub monto: f64,
        #[serde(deserialize_with = "optional_amount")]
        pub monto2: Option<f64>,
        #[serde(deserialize_with = "null_as_default")]
        pub especifica: String,
        #[serde(deserialize_with = "null_as_default")]
        pub especifica2: String,
        #[serde(deserialize_with = "null_as_default")]
        pub ff: String,
        #[serde(deserialize_with = "null_as_default")]
        pub mes: String,
        #[serde(deserialize_with = "null_as_default")]
        pub fecha_devengado: String,
        #[serde(deserialize_with = "null_as_default")]
        pub proyecto: String,
        #[serde(deserialize_with = "null_as_default")]
        pub meta: String,
        #[serde(deserialize_with = "null_as_default")]
        pub certificacion_viatico: ViaticoFlag,
        #[serde(deserialize_with = "null_as_default")]
        pub destino: String,
        #[serde(deserialize_with = "null_as_default")]
        pub fecha_salida: String,
        #[serde(deserialize_with = "null_as_default")]
        pub fecha_retorno: String,
    }

    /// Per-diem certification. Some backends send a boolean, others free
    /// text; the shape received is the shape sent back.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum ViaticoFlag {
        Flag(bool),
        Text(String),
    }

    impl Default for ViaticoFlag {
        fn default() -> Self {
            Self::Text(String::new())
        }
    }

    impl ViaticoFlag {
        /// Display text, booleans read as `SI`/`NO`.
        pub fn as_str(&self) -> &str {
            match self {
                Self::Flag(true) => "SI",
                Self::Flag(false) => "NO",
                Self::Text(text) => text,
            }
        }

        /// Value for edited `text`, staying a boolean while the text still
        /// reads as one.
        pub fn with_text(&self, text: &str) -> Self {
            if let Self::Flag(_) = self {
                match text.trim().to_uppercase().as_str() {
                    "SI" | "SÍ" => return Self::Flag(true),
                    "NO" => return Self::Flag(false),
                    _ => {}
                }
            }
            Self::Text(text.to_string())
        }
    }
}

pub mod error {
    use super::*;

    /// Error body returned by the backend on non-2xx responses.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ErrorResponse {
        #[serde(alias = "message")]
        pub error: String,
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

impl NumberOrText {
    fn into_amount<E: serde::de::Error>(self) -> Result<Option<f64>, E> {
        match self {
            Self::Number(value) => Ok(Some(value)),
            Self::Text(text) if text.trim().is_empty() => Ok(None),
            Self::Text(text) => text
                .trim()
                .replace(',', ".")
                .parse::<f64>()
                .ok()
                .filter(|amount| amount.is_finite())
                .map(Some)
                .ok_or_else(|| E::custom(format!("invalid amount: {text}"))),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_amount(deserializer)?.unwrap_or_default())
}

fn optional_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrText>::deserialize(deserializer)? {
        Some(value) => value.into_amount(),
        None => Ok(None),
    }
}
