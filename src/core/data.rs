use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// One named series with one (optional) value per category.
///
/// `None` marks a missing value; its bar exists but is neither drawn nor
/// hit-tested as containing anything meaningful.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default)]
    pub label: String,
    pub stroke_color: Color,
    pub fill_color: Color,
    #[serde(default)]
    pub highlight_fill: Option<Color>,
    #[serde(default)]
    pub highlight_stroke: Option<Color>,
    #[serde(default)]
    pub data: Vec<Option<f64>>,
}

impl Dataset {
    #[must_use]
    pub fn new(label: impl Into<String>, fill_color: Color, stroke_color: Color) -> Self {
        Self {
            label: label.into(),
            stroke_color,
            fill_color,
            highlight_fill: None,
            highlight_stroke: None,
            data: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_values(mut self, values: impl IntoIterator<Item = f64>) -> Self {
        self.data = values.into_iter().map(Some).collect();
        self
    }

    #[must_use]
    pub fn with_optional_values(mut self, values: impl IntoIterator<Item = Option<f64>>) -> Self {
        self.data = values.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_highlight(mut self, fill: Color, stroke: Color) -> Self {
        self.highlight_fill = Some(fill);
        self.highlight_stroke = Some(stroke);
        self
    }

    /// Highlight fill, falling back to the regular fill.
    #[must_use]
    pub fn resolved_highlight_fill(&self) -> Color {
        self.highlight_fill.unwrap_or(self.fill_color)
    }

    /// Highlight stroke, falling back to the regular stroke.
    #[must_use]
    pub fn resolved_highlight_stroke(&self) -> Color {
        self.highlight_stroke.unwrap_or(self.stroke_color)
    }
}

/// Category labels plus the datasets plotted against them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartData {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub datasets: Vec<Dataset>,
}

impl ChartData {
    #[must_use]
    pub fn new(labels: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            datasets: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_dataset(mut self, dataset: Dataset) -> Self {
        self.datasets.push(dataset);
        self
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let data: Self = serde_json::from_str(input)
            .map_err(|err| ChartError::InvalidData(format!("failed to parse chart data: {err}")))?;
        data.validate()?;
        Ok(data)
    }

    #[must_use]
    pub fn category_count(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn dataset_count(&self) -> usize {
        self.datasets.len()
    }

    /// Checks that every dataset carries exactly one entry per label and that
    /// present values and colors are well formed.
    pub fn validate(&self) -> ChartResult<()> {
        let categories = self.labels.len();
        for (index, dataset) in self.datasets.iter().enumerate() {
            if dataset.data.len() != categories {
                return Err(ChartError::InvalidData(format!(
                    "dataset {index} has {} values but there are {categories} labels",
                    dataset.data.len()
                )));
            }
            if dataset.data.iter().flatten().any(|value| !value.is_finite()) {
                return Err(ChartError::InvalidData(format!(
                    "dataset {index} contains a non-finite value"
                )));
            }
            dataset.fill_color.validate()?;
            dataset.stroke_color.validate()?;
            dataset.resolved_highlight_fill().validate()?;
            dataset.resolved_highlight_stroke().validate()?;
        }
        Ok(())
    }
}
