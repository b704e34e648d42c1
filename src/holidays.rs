use chrono::NaiveDate;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_HOLIDAY_URL: &str = "https://brasilapi.com.br/api/feriados/v1/{year}";
pub const DEFAULT_COUNTRY: &str = "BR";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Holiday {
    pub date: NaiveDate,
    pub name: String,
}

#[derive(thiserror::Error, Debug)]
pub enum HolidayError {
    #[error("holiday request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("holiday service answered {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed holiday payload: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Anything that can list the public holidays of a year.
pub trait HolidaySource {
    fn fetch(&self, year: i32) -> Result<Vec<Holiday>, HolidayError>;
}

/// Public holiday API reached over HTTP. The URL template may contain
/// `{year}` and `{country}` placeholders.
pub struct HttpHolidaySource {
    client: reqwest::blocking::Client,
    url_template: String,
    country: String,
}

impl HttpHolidaySource {
    pub fn new(
        url_template: impl Into<String>,
        country: impl Into<String>,
    ) -> Result<Self, HolidayError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("domeer/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(HttpHolidaySource {
            client,
            url_template: url_template.into(),
            country: country.into(),
        })
    }

    pub fn url_for(&self, year: i32) -> String {
        self.url_template
            .replace("{year}", &year.to_string())
            .replace("{country}", &self.country)
    }
}

impl HolidaySource for HttpHolidaySource {
    fn fetch(&self, year: i32) -> Result<Vec<Holiday>, HolidayError> {
        let url = self.url_for(year);
        log::debug!("fetching holidays from {}", url);
        let resp = self.client.get(&url).send()?;
        if !resp.status().is_success() {
            return Err(HolidayError::Status(resp.status()));
        }
        let body = resp.text()?;
        parse_holidays(&body)
    }
}

/// Parses a `[{"date": "YYYY-MM-DD", "name": ...}, ...]` payload. Extra
/// fields are ignored.
pub fn parse_holidays(body: &str) -> Result<Vec<Holiday>, HolidayError> {
    Ok(serde_json::from_str(body)?)
}

/// Fetches holidays, degrading to an empty list when the source fails.
pub fn load_holidays(source: &dyn HolidaySource, year: i32) -> Vec<Holiday> {
    match source.fetch(year) {
        Ok(holidays) => {
            log::debug!("loaded {} holidays for {}", holidays.len(), year);
            holidays
        }
        Err(err) => {
            log::warn!("could not load holidays for {}: {}", year, err);
            Vec::new()
        }
    }
}
