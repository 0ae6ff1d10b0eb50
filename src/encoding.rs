// ============================================================================
// Text Encoding
//
// Appended files are handled as text: decoded with the selected encoding,
// newline-translated, and encoded again for the output file. Only the first
// file is copied as raw bytes.
// ============================================================================

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use std::borrow::Cow;

/// Line terminator written for `\n` in text mode
#[cfg(windows)]
const LINE_TERMINATOR: &str = "\r\n";
#[cfg(not(windows))]
const LINE_TERMINATOR: &str = "\n";

/// Encoding used for every text read, write and append of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    /// Whatever the platform treats as its default text encoding
    #[default]
    Platform,
    /// UTF-8 regardless of platform
    Utf8,
}

impl TextEncoding {
    /// Map the `-utf8` argument: any non-empty value forces UTF-8
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some(value) if !value.is_empty() => TextEncoding::Utf8,
            _ => TextEncoding::Platform,
        }
    }

    pub fn encoding(self) -> &'static Encoding {
        match self {
            TextEncoding::Utf8 => UTF_8,
            TextEncoding::Platform => platform_default_encoding(),
        }
    }

    pub fn name(self) -> &'static str {
        self.encoding().name()
    }

    /// Strictly decode file contents; `None` if the bytes are not valid text
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        self.encoding()
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(|text| translate_newlines_in(&text).into_owned())
    }

    /// Encode text for writing, translating `\n` to the platform terminator
    pub fn encode(self, text: &str) -> Vec<u8> {
        let text = translate_newlines_out(text);
        let (bytes, _, had_unmappable) = self.encoding().encode(&text);
        if had_unmappable {
            log::warn!(
                "Some characters are not representable in {} and were replaced",
                self.name()
            );
        }
        bytes.into_owned()
    }
}

/// Default text encoding of the host platform
///
/// Unix-like systems run with UTF-8 locales; Windows uses its ANSI code page,
/// which is Windows-1252 for Western locales.
pub fn platform_default_encoding() -> &'static Encoding {
    if cfg!(windows) {
        WINDOWS_1252
    } else {
        UTF_8
    }
}

/// Read-side newline translation: `\r\n` and lone `\r` become `\n`
pub fn translate_newlines_in(text: &str) -> Cow<'_, str> {
    if !text.contains('\r') {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
}

/// Write-side newline translation
pub fn translate_newlines_out(text: &str) -> Cow<'_, str> {
    if LINE_TERMINATOR == "\n" || !text.contains('\n') {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.replace('\n', LINE_TERMINATOR))
}
