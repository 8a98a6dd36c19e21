use std::borrow::Cow;

/// Text encoding of names and string payloads.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum TextEncoding {
    /// Standard UTF-8. Invalid input is a decode error.
    #[default]
    Utf8,
    /// Java modified UTF-8 (CESU-8 with an encoded NUL), as written by Java
    /// edition. Invalid input is a decode error.
    #[cfg(feature = "mutf8")]
    Mutf8,
}

impl TextEncoding {
    /// Decodes `bytes`; `None` means invalid text.
    pub(crate) fn decode(self, bytes: Vec<u8>) -> Option<String> {
        match self {
            TextEncoding::Utf8 => String::from_utf8(bytes).ok(),
            #[cfg(feature = "mutf8")]
            TextEncoding::Mutf8 => simd_cesu8::mutf8::decode_strict(&bytes)
                .ok()
                .map(Cow::into_owned),
        }
    }

    pub(crate) fn encode(self, text: &str) -> Cow<'_, [u8]> {
        match self {
            TextEncoding::Utf8 => Cow::Borrowed(text.as_bytes()),
            #[cfg(feature = "mutf8")]
            TextEncoding::Mutf8 => simd_cesu8::mutf8::encode(text),
        }
    }
}

/// Runtime knobs shared by the decoder, the encoder and selective decode.
///
/// ```
/// use nbt_select::{CodecOptions, TextEncoding};
///
/// let options = CodecOptions {
///     max_depth: 64,
///     ..CodecOptions::default()
/// };
/// assert_eq!(options.text, TextEncoding::Utf8);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct CodecOptions {
    pub text: TextEncoding,
    /// Deepest list/compound nesting accepted while decoding. The root
    /// container is depth 1.
    pub max_depth: usize,
}

impl CodecOptions {
    pub const DEFAULT_MAX_DEPTH: usize = 512;
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            text: TextEncoding::default(),
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}
