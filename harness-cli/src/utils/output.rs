use qrcode::render::unicode;
use qrcode::QrCode;

use rst_common::standard::serde_json::{self, Value};

use crate::types::CliError;

pub fn print_json(value: &Value) -> Result<(), CliError> {
    let formatted =
        serde_json::to_string_pretty(value).map_err(|err| CliError::JSONError(err.to_string()))?;

    println!("{formatted}");
    Ok(())
}

pub fn parse_json(input: &str) -> Result<Value, CliError> {
    serde_json::from_str(input).map_err(|err| CliError::JSONError(err.to_string()))
}

/// `render_qr` draws `data` as a terminal QR code, two modules per character
pub fn render_qr(data: &str) -> Result<String, CliError> {
    let code = QrCode::new(data.as_bytes()).map_err(|err| CliError::QrError(err.to_string()))?;

    Ok(code
        .render::<unicode::Dense1x2>()
        .dark_color(unicode::Dense1x2::Light)
        .light_color(unicode::Dense1x2::Dark)
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rst_common::standard::serde_json::json;

    #[test]
    fn test_parse_json() {
        assert_eq!(parse_json(r#"{"label": "bob"}"#).unwrap(), json!({"label": "bob"}));
        assert!(matches!(parse_json("{"), Err(CliError::JSONError(_))));
    }

    #[test]
    fn test_render_qr() {
        let rendered = render_qr("http://localhost:8020?c_i=eyJsYWJlbCI6ICJib2IifQ==").unwrap();
        assert!(rendered.lines().count() > 10);
        assert!(rendered.contains('█') || rendered.contains('▀') || rendered.contains('▄'));

        let oversized = "x".repeat(8000);
        assert!(matches!(render_qr(&oversized), Err(CliError::QrError(_))));
    }
}
