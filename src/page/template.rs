use std::collections::BTreeMap;

use crate::foundation::core::Color;
use crate::foundation::error::{TelepageError, TelepageResult};

const BUILTIN_TEMPLATES: &str = include_str!("../../assets/templates.json");

/// One step of a template layout. Each step writes at the row cursor and advances it.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Section {
    Header,
    Separator {
        #[serde(default)]
        color: Option<Color>,
    },
    Title {
        #[serde(default = "default_true")]
        double_height: bool,
    },
    TitleBottom,
    Subtitle,
    Blank,
    Body {
        #[serde(default)]
        rows: Option<usize>,
    },
    SportsTable {
        #[serde(default)]
        rows: Option<usize>,
    },
    TvTable {
        #[serde(default)]
        rows: Option<usize>,
    },
    Fastext,
}

fn default_true() -> bool {
    true
}

/// How a `body` section lays out its text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyStyle {
    #[default]
    Wrapped,
    /// `Title ..... 123` lines with the page number right-aligned.
    Index,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SportsResult {
    pub home: String,
    pub away: String,
    #[serde(deserialize_with = "de_score")]
    pub home_score: String,
    #[serde(deserialize_with = "de_score")]
    pub away_score: String,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Listing {
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub programme: String,
}

/// Scores may be written as strings or integers.
fn de_score<'de, D>(de: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum Score {
        Text(String),
        Number(i64),
    }
    Ok(match <Score as serde::Deserialize>::deserialize(de)? {
        Score::Text(s) => s,
        Score::Number(n) => n.to_string(),
    })
}

/// A named page design: colours, default field values and the layout to execute.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Template {
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    pub header_bg: Color,
    pub header_text: Color,
    pub title_color: Color,
    pub body_color: Color,
    pub service_name: String,
    pub default_page_num: String,
    #[serde(default)]
    pub default_title: String,
    #[serde(default)]
    pub default_body: String,
    #[serde(default)]
    pub default_sports: Vec<SportsResult>,
    #[serde(default)]
    pub default_listings: Vec<Listing>,
    #[serde(default)]
    pub fastext: Vec<String>,
    #[serde(default)]
    pub body_style: BodyStyle,
    pub layout: Vec<Section>,
}

impl Template {
    pub fn validate(&self) -> TelepageResult<()> {
        if self.layout.is_empty() {
            return Err(TelepageError::validation(format!(
                "template '{}' has an empty layout",
                self.name
            )));
        }
        if self.fastext.len() > 4 {
            return Err(TelepageError::validation(format!(
                "template '{}' has {} fastext labels, max 4",
                self.name,
                self.fastext.len()
            )));
        }
        Ok(())
    }
}

/// Templates by id, in id order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TemplateCatalogue {
    templates: BTreeMap<String, Template>,
}

impl TemplateCatalogue {
    /// The embedded catalogue.
    pub fn builtin() -> TelepageResult<Self> {
        Self::from_json_str(BUILTIN_TEMPLATES)
    }

    pub fn from_json_str(s: &str) -> TelepageResult<Self> {
        let templates: BTreeMap<String, Template> =
            serde_json::from_str(s).map_err(|e| TelepageError::serde(e.to_string()))?;
        for t in templates.values() {
            t.validate()?;
        }
        Ok(Self { templates })
    }

    pub fn get(&self, id: &str) -> Option<&Template> {
        self.templates.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.templates.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Template)> + '_ {
        self.templates.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn insert(&mut self, id: impl Into<String>, template: Template) -> TelepageResult<()> {
        template.validate()?;
        self.templates.insert(id.into(), template);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/template.rs"]
mod tests;
