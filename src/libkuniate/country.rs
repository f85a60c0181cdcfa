use crate::error::UnknownQuestionType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One country as the game sees it. Immutable for the whole session.
///
/// Deserializes from (and serializes to) the REST Countries v3.1 layout, of
/// which only `name.common`, `flags`, `capital` and `borders` are read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CountryJson", into = "CountryJson")]
pub struct CountryRecord {
    pub name: String,
    pub flag_image: Option<String>,
    pub flag_description: Option<String>,
    pub capital: Option<Vec<String>>,
    pub borders: Option<Vec<String>>,
}

impl CountryRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            flag_image: None,
            flag_description: None,
            capital: None,
            borders: None,
        }
    }

    pub fn with_flag(mut self, image: impl Into<String>, description: Option<&str>) -> Self {
        self.flag_image = Some(image.into());
        self.flag_description = description.map(str::to_owned);
        self
    }

    pub fn with_capital<S: Into<String>>(mut self, capital: impl IntoIterator<Item = S>) -> Self {
        self.capital = Some(capital.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_borders<S: Into<String>>(mut self, borders: impl IntoIterator<Item = S>) -> Self {
        self.borders = Some(borders.into_iter().map(Into::into).collect());
        self
    }

    pub fn first_capital(&self) -> Option<&str> {
        self.capital.as_deref()?.first().map(String::as_str)
    }

    pub fn first_border(&self) -> Option<&str> {
        self.borders.as_deref()?.first().map(String::as_str)
    }
}

#[derive(Serialize, Deserialize, Debug)]
struct CountryJson {
    name: NameJson,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    flags: Option<FlagsJson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    capital: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    borders: Option<Vec<String>>,
}
#[derive(Serialize, Deserialize, Debug)]
struct NameJson {
    common: String,
}
#[derive(Serialize, Deserialize, Debug)]
struct FlagsJson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    svg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    png: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    alt: Option<String>,
}

impl From<CountryJson> for CountryRecord {
    fn from(json: CountryJson) -> Self {
        let (flag_image, flag_description) = match json.flags {
            Some(flags) => (flags.svg.or(flags.png), flags.alt),
            None => (None, None),
        };
        Self {
            name: json.name.common,
            flag_image,
            flag_description,
            capital: json.capital,
            borders: json.borders,
        }
    }
}

impl From<CountryRecord> for CountryJson {
    fn from(record: CountryRecord) -> Self {
        let flags = if record.flag_image.is_none() && record.flag_description.is_none() {
            None
        } else {
            Some(FlagsJson {
                svg: record.flag_image,
                png: None,
                alt: record.flag_description,
            })
        };
        Self {
            name: NameJson {
                common: record.name,
            },
            flags,
            capital: record.capital,
            borders: record.borders,
        }
    }
}

/// What the player is shown to identify the subject.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    #[default]
    Flag,
    Capital,
    Borders,
}

impl QuestionType {
    pub fn title(self) -> &'static str {
        match self {
            QuestionType::Flag => "Guess the Country by Flag",
            QuestionType::Capital => "Guess the Country by Capital",
            QuestionType::Borders => "Guess the Country by Borders",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            QuestionType::Flag => "flag",
            QuestionType::Capital => "capital",
            QuestionType::Borders => "borders",
        })
    }
}

impl FromStr for QuestionType {
    type Err = UnknownQuestionType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flag" | "f" => Ok(QuestionType::Flag),
            "capital" | "c" => Ok(QuestionType::Capital),
            "borders" | "b" => Ok(QuestionType::Borders),
            _ => Err(UnknownQuestionType(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOSNIA: &str = r#"{
        "name": {"common": "Bosnia and Herzegovina", "official": "Bosnia and Herzegovina", "nativeName": {}},
        "flags": {
            "png": "https://flagcdn.com/w320/ba.png",
            "svg": "https://flagcdn.com/ba.svg",
            "alt": "The flag of Bosnia and Herzegovina has a blue field"
        },
        "capital": ["Sarajevo"],
        "borders": ["HRV", "MNE", "SRB"]
    }"#;

    #[test]
    fn test_parse_rest_countries_shape() {
        let record: CountryRecord = serde_json::from_str(BOSNIA).unwrap();

        assert_eq!(record.name, "Bosnia and Herzegovina");
        assert_eq!(record.flag_image.as_deref(), Some("https://flagcdn.com/ba.svg"));
        assert!(record.flag_description.unwrap().starts_with("The flag of"));
        assert_eq!(record.capital, Some(vec!["Sarajevo".to_owned()]));
        assert_eq!(record.borders.unwrap().len(), 3);
    }

    #[test]
    fn test_parse_missing_optional_fields() {
        let record: CountryRecord =
            serde_json::from_str(r#"{"name": {"common": "Antarctica"}}"#).unwrap();

        assert_eq!(record, CountryRecord::new("Antarctica"));
        assert_eq!(record.first_capital(), None);
        assert_eq!(record.first_border(), None);
    }

    #[test]
    fn test_png_used_when_svg_missing() {
        let record: CountryRecord = serde_json::from_str(
            r#"{"name": {"common": "Chad"}, "flags": {"png": "https://flagcdn.com/w320/td.png"}}"#,
        )
        .unwrap();

        assert_eq!(record.flag_image.as_deref(), Some("https://flagcdn.com/w320/td.png"));
        assert_eq!(record.flag_description, None);
    }

    #[test]
    fn test_serialize_keeps_shape() {
        let record = CountryRecord::new("Denmark")
            .with_capital(["Copenhagen"])
            .with_borders(["DEU"]);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["name"]["common"], "Denmark");
        assert_eq!(json["capital"][0], "Copenhagen");
        assert!(json.get("flags").is_none());

        let back: CountryRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_empty_and_absent_capital_differ() {
        let empty = CountryRecord::new("Aland").with_capital(Vec::<String>::new());

        assert_eq!(empty.capital, Some(vec![]));
        assert_eq!(empty.first_capital(), None);
    }

    #[test]
    fn test_question_type_from_str() {
        assert_eq!("flag".parse::<QuestionType>().unwrap(), QuestionType::Flag);
        assert_eq!("Capital".parse::<QuestionType>().unwrap(), QuestionType::Capital);
        assert_eq!("b".parse::<QuestionType>().unwrap(), QuestionType::Borders);
        assert!("currency".parse::<QuestionType>().is_err());
        assert_eq!(QuestionType::Borders.to_string(), "borders");
    }
}
