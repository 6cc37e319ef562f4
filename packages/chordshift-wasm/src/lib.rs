use serde::Serialize;
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
struct BindingError {
    message: String,
}

fn to_js_error(message: impl ToString) -> JsValue {
    let error = BindingError {
        message: message.to_string(),
    };
    match serde_json::to_string(&error) {
        Ok(json) => JsValue::from_str(&json),
        Err(_) => JsValue::from_str(&error.message),
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // fails only when a logger is already installed
    #[cfg(feature = "console_log")]
    let _ = console_log::init_with_level(log::Level::Warn);
}

/// Lay inline lyrics out as chords over lyrics
#[wasm_bindgen]
pub fn to_chord_sheet(lyrics: &str) -> String {
    chordshift::to_chord_sheet(lyrics)
}

/// Convert an edited chord sheet to inline lyrics
#[wasm_bindgen]
pub fn to_inline(sheet: &str) -> String {
    chordshift::to_inline(sheet)
}

/// Detected key label, "C" when the lyrics have no chords
#[wasm_bindgen]
pub fn detect_key(lyrics: &str) -> String {
    chordshift::detect_key(lyrics).label().to_string()
}

/// Transpose by semitones; `use_flats` undefined keeps each chord's spelling family
#[wasm_bindgen]
pub fn transpose(lyrics: &str, semitones: i32, use_flats: Option<bool>) -> String {
    chordshift::transpose_text(lyrics, semitones, use_flats)
}

/// Transpose from the detected key into `key` (any spelling, e.g. "A#")
#[wasm_bindgen]
pub fn transpose_to_key(lyrics: &str, key: &str) -> Result<String, JsValue> {
    let target: chordshift::Key = key.parse().map_err(to_js_error)?;
    Ok(chordshift::transpose_to_key(lyrics, target))
}

/// Tokenize one line for rendering as `{ tokens: [{ chord, text }], hasChords }`
#[wasm_bindgen]
pub fn parse_lyrics_line(line: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&chordshift::parse_lyrics_line(line)).map_err(to_js_error)
}

/// Viewer state for a song shifted by `shift` semitones, as JSON
#[wasm_bindgen]
pub fn view(lyrics: &str, shift: i32) -> Result<String, JsValue> {
    serde_json::to_string(&chordshift::api::view(lyrics, shift)).map_err(to_js_error)
}

/// Sheet preview lines as JSON: `[{ type, text, chords: [{ chord, column }] }]`
#[wasm_bindgen]
pub fn preview(sheet: &str) -> Result<String, JsValue> {
    serde_json::to_string(&chordshift::sheet::preview(sheet)).map_err(to_js_error)
}
