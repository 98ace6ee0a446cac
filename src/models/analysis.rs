use serde::{ Deserialize, Serialize };
use serde_json::{ Map, Value };

/// Score used when the model does not rate the visual style
pub const DEFAULT_VISUAL_STYLE_SCORE: i64 = 5;

/// Competitive assessment of one site
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitorAnalysis {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub unique_offers: Vec<String>,
    pub recommendations: Vec<String>,
    pub summary: String,
}

impl CompetitorAnalysis {
    /// Build from an extracted mapping; every missing or unusable field falls back to empty
    pub fn from_mapping(data: &Map<String, Value>) -> Self {
        Self {
            strengths: string_list(data, "strengths"),
            weaknesses: string_list(data, "weaknesses"),
            unique_offers: string_list(data, "unique_offers"),
            recommendations: string_list(data, "recommendations"),
            summary: text(data, "summary"),
        }
    }

    /// Analysis returned when a page had no text worth sending to the model
    pub fn no_content() -> Self {
        Self {
            summary: "Не удалось извлечь контент для анализа".to_string(),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.strengths.is_empty() &&
            self.weaknesses.is_empty() &&
            self.unique_offers.is_empty() &&
            self.recommendations.is_empty() &&
            self.summary.is_empty()
    }
}

/// Visual and marketing assessment of a screenshot or banner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAnalysis {
    pub description: String,
    pub marketing_insights: Vec<String>,
    /// Expected 1-10, passed through unchecked
    pub visual_style_score: i64,
    pub visual_style_analysis: String,
    pub recommendations: Vec<String>,
}

impl Default for ImageAnalysis {
    fn default() -> Self {
        Self {
            description: String::new(),
            marketing_insights: Vec::new(),
            visual_style_score: DEFAULT_VISUAL_STYLE_SCORE,
            visual_style_analysis: String::new(),
            recommendations: Vec::new(),
        }
    }
}

impl ImageAnalysis {
    pub fn from_mapping(data: &Map<String, Value>) -> Self {
        Self {
            description: text(data, "description"),
            marketing_insights: string_list(data, "marketing_insights"),
            visual_style_score: score(data, "visual_style_score"),
            visual_style_analysis: text(data, "visual_style_analysis"),
            recommendations: string_list(data, "recommendations"),
        }
    }
}

fn string_list(data: &Map<String, Value>, key: &str) -> Vec<String> {
    match data.get(key) {
        Some(Value::Array(items)) =>
            items
                .iter()
                .filter_map(|item| match item {
                    Value::Null => None,
                    Value::String(s) => Some(s.clone()),
                    other => Some(other.to_string()),
                })
                .collect(),
        _ => Vec::new(),
    }
}

fn text(data: &Map<String, Value>, key: &str) -> String {
    match data.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(value @ (Value::Number(_) | Value::Bool(_))) => value.to_string(),
        _ => String::new(),
    }
}

fn score(data: &Map<String, Value>, key: &str) -> i64 {
    let parsed = match data.get(key) {
        Some(Value::Number(n)) =>
            n.as_i64().or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed.unwrap_or(DEFAULT_VISUAL_STYLE_SCORE)
}
