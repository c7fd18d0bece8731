//! Viewer configuration.
//!
//! Defaults come from [`crate::constants`]. The web front-end may override a
//! few of them from the page's query string, e.g.
//! `?model=gltf/Duck.glb&sensitivity=0.01&redraw=immediate`.

use crate::color::Color;
use crate::constants::{CLEAR_COLOR, DEFAULT_MODEL_URL, DRAG_SENSITIVITY};
use crate::error::ViewerError;

/// When a requested redraw actually renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RedrawMode {
    /// Render synchronously inside the event that asked for it.
    Immediate,
    /// Mark the frame dirty and let the host render once per animation frame.
    #[default]
    Coalesced,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewerConfig {
    pub model_url: String,
    pub sensitivity: f32,
    pub redraw: RedrawMode,
    pub redraw_on_resize: bool,
    pub clear_color: Color,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            model_url: DEFAULT_MODEL_URL.to_string(),
            sensitivity: DRAG_SENSITIVITY,
            redraw: RedrawMode::default(),
            redraw_on_resize: true,
            clear_color: Color::from_hex(CLEAR_COLOR),
        }
    }
}

impl ViewerConfig {
    /// Apply overrides from a URL query string (leading `?` optional).
    /// Unknown keys are left for the page; a bad value for a known key fails
    /// without applying anything.
    pub fn apply_query(&mut self, query: &str) -> Result<(), ViewerError> {
        let mut next = self.clone();
        for (key, value) in parse_query(query) {
            next.apply(&key, &value)?;
        }
        *self = next;
        Ok(())
    }

    fn apply(&mut self, key: &str, value: &str) -> Result<(), ViewerError> {
        let invalid = || ViewerError::InvalidConfig {
            key: key.to_string(),
            value: value.to_string(),
        };
        match key {
            "model" => {
                if value.is_empty() {
                    return Err(invalid());
                }
                self.model_url = value.to_string();
            }
            "sensitivity" => {
                let s: f32 = value.parse().map_err(|_| invalid())?;
                if !s.is_finite() || s <= 0.0 {
                    return Err(invalid());
                }
                self.sensitivity = s;
            }
            "redraw" => {
                self.redraw = match value {
                    "immediate" => RedrawMode::Immediate,
                    "frame" | "coalesced" => RedrawMode::Coalesced,
                    _ => return Err(invalid()),
                };
            }
            "redraw_on_resize" => {
                self.redraw_on_resize = parse_bool(value).ok_or_else(invalid)?;
            }
            "background" => {
                let hex = value.trim_start_matches('#').trim_start_matches("0x");
                if hex.len() != 6 {
                    return Err(invalid());
                }
                let rgb = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;
                self.clear_color = Color::from_hex(rgb);
            }
            _ => log::debug!("[config] ignoring query key {:?}", key),
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Split `a=1&b=2` into decoded pairs. Pairs without `=` get an empty value.
pub fn parse_query(query: &str) -> Vec<(String, String)> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((k, v)) => (percent_decode(k), percent_decode(v)),
            None => (percent_decode(pair), String::new()),
        })
        .collect()
}

fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' if i + 2 < bytes.len() => match (hex_val(bytes[i + 1]), hex_val(bytes[i + 2])) {
                (Some(hi), Some(lo)) => {
                    out.push(hi << 4 | lo);
                    i += 2;
                }
                _ => out.push(b'%'),
            },
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[inline]
fn hex_val(b: u8) -> Option<u8> {
    (b as char).to_digit(16).map(|d| d as u8)
}
