use crate::load::LoaderOptions;
use std::path::PathBuf;

/// The SSP export this tool was written for, read from the working directory.
pub const DEFAULT_INPUT: &str = "Roubo_de_Celular_Data_SSP.csv";

pub const DATE_COLUMN: &str = "DATAOCORRENCIA";
pub const TIME_COLUMN: &str = "HORAOCORRENCIA";
pub const PERIOD_COLUMN: &str = "PERIDOOCORRENCIA";
pub const CITY_COLUMN: &str = "CIDADE";
pub const SEX_COLUMN: &str = "SEXO";
pub const AGE_COLUMN: &str = "IDADE";
pub const PROFESSION_COLUMN: &str = "PROFISSAO";
pub const BRAND_COLUMN: &str = "MARCA_CELULAR";
pub const STATION_COLUMN: &str = "DELEGACIA_NOME";

/// Columns kept by the cleaner, in output order.
pub const SELECTED_COLUMNS: [&str; 9] = [
    DATE_COLUMN,
    TIME_COLUMN,
    PERIOD_COLUMN,
    CITY_COLUMN,
    SEX_COLUMN,
    AGE_COLUMN,
    PROFESSION_COLUMN,
    BRAND_COLUMN,
    STATION_COLUMN,
];

pub const TOP_N: usize = 10;

/// Everything the pipeline needs to know about its input. There is no file or
/// flag parsing; `Default` is the only configuration the binary uses.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input_path: PathBuf,
    pub loader: LoaderOptions,
    pub columns: Vec<String>,
    pub date_column: String,
    pub brand_column: String,
    pub city_column: String,
    pub period_column: String,
    pub age_column: String,
    /// Row limit for the city and brand rankings.
    pub top_n: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT),
            loader: LoaderOptions::default(),
            columns: SELECTED_COLUMNS.iter().map(|c| c.to_string()).collect(),
            date_column: DATE_COLUMN.into(),
            brand_column: BRAND_COLUMN.into(),
            city_column: CITY_COLUMN.into(),
            period_column: PERIOD_COLUMN.into(),
            age_column: AGE_COLUMN.into(),
            top_n: TOP_N,
        }
    }
}

impl PipelineConfig {
    /// Same settings, different input file.
    pub fn with_input(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = path.into();
        self
    }
}
