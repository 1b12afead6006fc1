//! Test helpers for the mocked weather provider

#![allow(dead_code)]

use chrono::NaiveDate;
use std::io::Read;
use std::path::Path;
use std::time::Duration;
use weather_report::{HistoryClient, IconFetcher};
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

pub const API_KEY: &str = "test-key-123";
pub const ICON_PATH: &str = "/64x64/day/113.png";

/// A valid 1x1 RGBA PNG.
pub const PNG_1X1: [u8; 67] = [
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Scheme-relative icon reference pointing at the mock server, the way the provider
/// hands them out.
pub fn scheme_relative_icon(server: &MockServer) -> String {
    let uri = server.uri();
    format!("{}{}", uri.trim_start_matches("http:"), ICON_PATH)
}

/// Sample `history.json` body for `date`.
pub fn history_body(date: NaiveDate, icon: &str) -> serde_json::Value {
    serde_json::json!({
        "location": {
            "name": "Lublin",
            "region": "",
            "country": "Poland",
            "lat": 51.25,
            "lon": 22.57,
            "tz_id": "Europe/Warsaw"
        },
        "forecast": {
            "forecastday": [{
                "date": date.format("%Y-%m-%d").to_string(),
                "date_epoch": 1686182400,
                "day": {
                    "maxtemp_c": 24.3,
                    "maxtemp_f": 75.7,
                    "mintemp_c": 11.0,
                    "mintemp_f": 51.8,
                    "avgtemp_c": 17.6,
                    "avgtemp_f": 63.7,
                    "maxwind_mph": 8.3,
                    "maxwind_kph": 13.3,
                    "totalprecip_mm": 0.0,
                    "totalprecip_in": 0.0,
                    "avghumidity": 58.0,
                    "condition": {
                        "text": "Słonecznie",
                        "icon": icon,
                        "code": 1000
                    },
                    "uv": 7.0
                },
                "astro": { "sunrise": "04:18 AM", "sunset": "08:51 PM" },
                "hour": []
            }]
        }
    })
}

pub fn provider_error_body(code: i64, message: &str) -> serde_json::Value {
    serde_json::json!({ "error": { "code": code, "message": message } })
}

/// Client configured against the mock server.
pub fn test_client(server: &MockServer) -> HistoryClient {
    HistoryClient::builder()
        .api_key(API_KEY)
        .base_url(server.uri())
        .language("en")
        .timeout(Duration::from_secs(5))
        .build()
        .expect("Failed to create client")
}

pub fn test_icons() -> IconFetcher {
    IconFetcher::new(Duration::from_secs(5)).expect("Failed to create icon fetcher")
}

/// Answers history requests for `date` with `response`.
pub async fn mount_history(server: &MockServer, date: NaiveDate, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/v1/history.json"))
        .and(query_param("dt", date.format("%Y-%m-%d").to_string()))
        .respond_with(response)
        .mount(server)
        .await;
}

pub async fn mount_icon(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(ICON_PATH))
        .respond_with(response)
        .mount(server)
        .await;
}

pub fn png_response() -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "image/png")
        .set_body_bytes(PNG_1X1.to_vec())
}

/// Dates requested from the history endpoint, in arrival order.
pub async fn requested_dates(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path() == "/v1/history.json")
        .filter_map(|request| {
            request
                .url
                .query_pairs()
                .find(|(key, _)| key == "dt")
                .map(|(_, value)| value.into_owned())
        })
        .collect()
}

pub async fn icon_requests(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path() == ICON_PATH)
        .count()
}

/// The parts of a saved xlsx file the tests look at.
pub struct SavedWorkbook {
    pub entries: Vec<String>,
    pub sheet: String,
    pub styles: String,
    pub shared_strings: Vec<String>,
    pub drawing: Option<String>,
}

fn read_entry(archive: &mut zip::ZipArchive<std::fs::File>, name: &str) -> Option<String> {
    let mut entry = archive.by_name(name).ok()?;
    let mut xml = String::new();
    entry.read_to_string(&mut xml).unwrap();
    Some(xml)
}

pub fn open_workbook(path: &Path) -> SavedWorkbook {
    let file = std::fs::File::open(path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let entries: Vec<String> = archive.file_names().map(String::from).collect();
    let shared_strings = read_entry(&mut archive, "xl/sharedStrings.xml")
        .map(|xml| {
            xml.split("<si>")
                .skip(1)
                .map(|item| {
                    let text = &item[item.find("<t").unwrap()..];
                    text[text.find('>').unwrap() + 1..text.find("</t>").unwrap()].to_string()
                })
                .collect()
        })
        .unwrap_or_default();

    SavedWorkbook {
        entries,
        sheet: read_entry(&mut archive, "xl/worksheets/sheet1.xml").unwrap(),
        styles: read_entry(&mut archive, "xl/styles.xml").unwrap(),
        shared_strings,
        drawing: read_entry(&mut archive, "xl/drawings/drawing1.xml"),
    }
}

impl SavedWorkbook {
    /// Opening tag of cell `reference` (e.g. `C2`).
    pub fn cell_tag(&self, reference: &str) -> Option<&str> {
        let start = self.sheet.find(&format!("<c r=\"{reference}\""))?;
        let rest = &self.sheet[start..];
        Some(&rest[..=rest.find('>')?])
    }

    /// Text of cell `reference`, resolved through the shared string table.
    pub fn cell_text(&self, reference: &str) -> Option<String> {
        let start = self.sheet.find(&format!("<c r=\"{reference}\""))?;
        let cell = &self.sheet[start..];
        let cell = &cell[..cell.find("</c>")?];
        let value = &cell[cell.find("<v>")? + 3..cell.find("</v>")?];
        if cell.contains("t=\"s\"") {
            self.shared_strings.get(value.parse::<usize>().ok()?).cloned()
        } else {
            Some(value.to_string())
        }
    }

    /// Opening tag of 1-based row `row`.
    pub fn row_tag(&self, row: u32) -> Option<&str> {
        let start = self.sheet.find(&format!("<row r=\"{row}\""))?;
        let rest = &self.sheet[start..];
        Some(&rest[..=rest.find('>')?])
    }

    /// Column definition covering the 1-based column `col`. Adjacent columns with the
    /// same settings share one `<col>` range.
    pub fn col_tag(&self, col: u32) -> Option<&str> {
        let attr = |tag: &str, name: &str| -> Option<u32> {
            let start = tag.find(&format!(" {name}=\""))? + name.len() + 3;
            tag[start..].split('"').next()?.parse().ok()
        };
        self.sheet.match_indices("<col ").find_map(|(start, _)| {
            let rest = &self.sheet[start..];
            let tag = &rest[..=rest.find('>')?];
            (attr(tag, "min")? <= col && col <= attr(tag, "max")?).then_some(tag)
        })
    }

    /// Number of pictures anchored in the drawing.
    pub fn image_anchors(&self) -> usize {
        self.drawing.as_deref().map_or(0, |xml| {
            xml.matches("<xdr:twoCellAnchor").count() + xml.matches("<xdr:oneCellAnchor").count()
        })
    }
}
