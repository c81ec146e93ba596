// src/aggregate/mod.rs
use crate::config::PipelineConfig;
use crate::process::utils::{append_column, as_string_array, column_index};
use anyhow::{anyhow, Context, Result};
use arrow::{
    array::{Array, ArrayRef, Float64Array, Int64Array, StringArray},
    compute::cast,
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use std::{
    collections::{hash_map::Entry, HashMap},
    sync::Arc,
};
use tracing::debug;

pub mod age;

pub use age::{age_bracket, AGE_BRACKET_COLUMN};

/// Name of the count column in every view.
pub const COUNT_COLUMN: &str = "total_roubos";

/// A titled group-by-count result.
#[derive(Debug, Clone)]
pub struct View {
    pub title: String,
    pub table: RecordBatch,
}

impl View {
    pub fn counts(&self) -> Result<&Int64Array> {
        self.table
            .column(1)
            .as_any()
            .downcast_ref::<Int64Array>()
            .ok_or_else(|| anyhow!("view {} has no count column", self.title))
    }
}

/// Group rows by the text rendering of `key`, count each group, and sort by
/// count descending. Null keys form one group. Ties keep first-appearance order.
pub fn count_by(batch: &RecordBatch, key: &str, limit: Option<usize>) -> Result<RecordBatch> {
    let idx = column_index(batch, key)?;
    let keys = as_string_array(batch.column(idx))?;

    let mut positions: HashMap<Option<&str>, usize> = HashMap::new();
    let mut groups: Vec<(Option<&str>, i64)> = Vec::new();
    for k in keys.iter() {
        match positions.entry(k) {
            Entry::Occupied(e) => groups[*e.get()].1 += 1,
            Entry::Vacant(e) => {
                e.insert(groups.len());
                groups.push((k, 1));
            }
        }
    }
    debug!(key, groups = groups.len(), "grouped");

    // stable: equal counts stay in first-seen order
    groups.sort_by(|a, b| b.1.cmp(&a.1));
    if let Some(n) = limit {
        groups.truncate(n);
    }

    let names: StringArray = groups.iter().map(|(k, _)| *k).collect();
    let counts = Int64Array::from_iter_values(groups.iter().map(|(_, c)| *c));
    let schema = Arc::new(Schema::new(vec![
        Field::new(key, DataType::Utf8, true),
        Field::new(COUNT_COLUMN, DataType::Int64, false),
    ]));

    RecordBatch::try_new(schema, vec![Arc::new(names) as ArrayRef, Arc::new(counts)])
        .with_context(|| format!("building count view for {}", key))
}

/// Append the derived `faixa_etaria` column computed from `age_column`.
/// Ages are compared numerically; text that is not a number counts as missing.
pub fn with_age_bracket(batch: &RecordBatch, age_column: &str) -> Result<RecordBatch> {
    let idx = column_index(batch, age_column)?;
    let ages = cast(batch.column(idx), &DataType::Float64)
        .with_context(|| format!("reading {} as a number", age_column))?;
    let ages = ages
        .as_any()
        .downcast_ref::<Float64Array>()
        .ok_or_else(|| anyhow!("expected Float64Array for {}", age_column))?;

    let brackets: StringArray = ages.iter().map(|a| Some(age_bracket(a))).collect();
    append_column(batch, AGE_BRACKET_COLUMN, Arc::new(brackets))
}

/// The four report views over the cleaned table, in report order:
/// top cities, period of day, age bracket, top brands.
pub fn build_views(cleaned: &RecordBatch, config: &PipelineConfig) -> Result<Vec<View>> {
    let top = Some(config.top_n);

    let ((cities, periods), (ages, brands)) = rayon::join(
        || {
            rayon::join(
                || count_by(cleaned, &config.city_column, top),
                || count_by(cleaned, &config.period_column, None),
            )
        },
        || {
            rayon::join(
                || {
                    with_age_bracket(cleaned, &config.age_column)
                        .and_then(|t| count_by(&t, AGE_BRACKET_COLUMN, None))
                },
                || count_by(cleaned, &config.brand_column, top),
            )
        },
    );

    Ok(vec![
        View {
            title: format!("Top {} Cidades com Mais Roubos", config.top_n),
            table: cities?,
        },
        View {
            title: "Roubos por Período do Dia".into(),
            table: periods?,
        },
        View {
            title: "Roubos por Faixa Etária".into(),
            table: ages?,
        },
        View {
            title: format!("Top {} Marcas de Celular Mais Roubadas", config.top_n),
            table: brands?,
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(cities: Vec<Option<&str>>, ages: Vec<Option<i64>>) -> RecordBatch {
        let schema = Arc::new(Schema::new(vec![
            Field::new("CIDADE", DataType::Utf8, true),
            Field::new("IDADE", DataType::Int64, true),
        ]));
        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(StringArray::from(cities)),
                Arc::new(Int64Array::from(ages)),
            ],
        )
        .expect("valid batch")
    }

    fn keys(view: &RecordBatch) -> Vec<Option<String>> {
        let arr = view
            .column(0)
            .as_any()
            .downcast_ref::<StringArray>()
            .expect("key column");
        arr.iter().map(|k| k.map(str::to_string)).collect()
    }

    fn counts(view: &RecordBatch) -> Vec<i64> {
        let arr = view
            .column(1)
            .as_any()
            .downcast_ref::<Int64Array>()
            .expect("count column");
        arr.values().to_vec()
    }

    #[test]
    fn counts_sorted_descending_with_null_group() -> Result<()> {
        let b = batch(
            vec![Some("A"), Some("B"), None, Some("B"), Some("C"), None, Some("B")],
            vec![None; 7],
        );
        let out = count_by(&b, "CIDADE", None)?;
        assert_eq!(out.schema().field(1).name(), COUNT_COLUMN);
        assert_eq!(
            keys(&out),
            vec![Some("B".into()), None, Some("A".into()), Some("C".into())]
        );
        assert_eq!(counts(&out), vec![3, 2, 1, 1]);
        Ok(())
    }

    #[test]
    fn limit_truncates_and_keeps_order() -> Result<()> {
        let cities: Vec<String> = (0..15).map(|i| format!("CIDADE {i:02}")).collect();
        let mut values: Vec<Option<&str>> = Vec::new();
        for (i, c) in cities.iter().enumerate() {
            for _ in 0..=i {
                values.push(Some(c.as_str()));
            }
        }
        let ages = vec![None; values.len()];
        let out = count_by(&batch(values, ages), "CIDADE", Some(10))?;

        let got = counts(&out);
        assert_eq!(got.len(), 10);
        assert!(got.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(got[0], 15);
        Ok(())
    }

    #[test]
    fn unknown_key_is_an_error() {
        let b = batch(vec![Some("A")], vec![Some(1)]);
        assert!(count_by(&b, "BAIRRO", None).is_err());
    }

    #[test]
    fn age_bracket_column_from_integers() -> Result<()> {
        let b = batch(
            vec![Some("A"); 6],
            vec![Some(17), Some(18), Some(35), Some(50), Some(100), None],
        );
        let out = with_age_bracket(&b, "IDADE")?;
        assert_eq!(out.num_columns(), 3);

        let brackets = out
            .column(2)
            .as_any()
            .downcast_ref::<StringArray>()
            .expect("bracket column");
        let got: Vec<&str> = brackets.iter().flatten().collect();
        assert_eq!(
            got,
            vec![
                "Menor de 18",
                "18-25 anos",
                "26-35 anos",
                "36-50 anos",
                "50-100 anos",
                "Não Informado"
            ]
        );
        Ok(())
    }

    #[test]
    fn age_bracket_from_text_column() -> Result<()> {
        let schema = Arc::new(Schema::new(vec![Field::new("IDADE", DataType::Utf8, true)]));
        let b = RecordBatch::try_new(
            schema,
            vec![Arc::new(StringArray::from(vec![
                Some("22"),
                Some("NI"),
                Some("25.5"),
            ]))],
        )?;
        let out = with_age_bracket(&b, "IDADE")?;
        let brackets = out
            .column(1)
            .as_any()
            .downcast_ref::<StringArray>()
            .expect("bracket column");
        let got: Vec<&str> = brackets.iter().flatten().collect();
        assert_eq!(got, vec!["18-25 anos", "Não Informado", "26-35 anos"]);
        Ok(())
    }

    #[test]
    fn build_views_returns_four_in_order() -> Result<()> {
        let schema = Arc::new(Schema::new(vec![
            Field::new("CIDADE", DataType::Utf8, true),
            Field::new("PERIDOOCORRENCIA", DataType::Utf8, true),
            Field::new("IDADE", DataType::Int64, true),
            Field::new("MARCA_CELULAR", DataType::Utf8, true),
        ]));
        let b = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(StringArray::from(vec!["S.PAULO", "SANTOS", "S.PAULO"])),
                Arc::new(StringArray::from(vec!["A NOITE", "A NOITE", "PELA MANHÃ"])),
                Arc::new(Int64Array::from(vec![Some(20), None, Some(70)])),
                Arc::new(StringArray::from(vec!["SAMSUNG", "APPLE", "SAMSUNG"])),
            ],
        )?;

        let views = build_views(&b, &PipelineConfig::default())?;
        let titles: Vec<&str> = views.iter().map(|v| v.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Top 10 Cidades com Mais Roubos",
                "Roubos por Período do Dia",
                "Roubos por Faixa Etária",
                "Top 10 Marcas de Celular Mais Roubadas"
            ]
        );
        assert_eq!(views[0].counts()?.values().to_vec(), vec![2, 1]);
        assert_eq!(views[2].table.num_rows(), 3);
        Ok(())
    }
}
