//! Sensitive data masking for logs.
//!
//! Phone numbers are partially masked before they reach any log sink, and
//! OTP codes, passwords, and auth tokens are scrubbed from free-form text.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Characters kept at each end of a masked phone number.
const PHONE_VISIBLE: usize = 2;

/// Patterns for detecting sensitive data.
static PATTERNS: LazyLock<Vec<SensitivePattern>> = LazyLock::new(|| {
    vec![
        SensitivePattern {
            name: "password",
            regex: Regex::new(r#"(?i)(password|passwd|pin)["\s:=]+["']?([^\s"',}]{4,})["']?"#)
                .expect("password pattern"),
            group: 2,
        },
        SensitivePattern {
            name: "otp",
            regex: Regex::new(r#"(?i)(otp|code|verification_code)["\s:=]+["']?([0-9]{4,8})["']?"#)
                .expect("otp pattern"),
            group: 2,
        },
        SensitivePattern {
            name: "token",
            regex: Regex::new(
                r#"(?i)(token|access_token|refresh_token|authorization)["\s:=]+["']?([a-zA-Z0-9._-]{8,})["']?"#,
            )
            .expect("token pattern"),
            group: 2,
        },
        SensitivePattern {
            name: "bearer_token",
            regex: Regex::new(r"(?i)bearer\s+([a-zA-Z0-9._-]{8,})").expect("bearer pattern"),
            group: 1,
        },
        SensitivePattern {
            name: "jwt",
            regex: Regex::new(r"eyJ[a-zA-Z0-9_-]*\.eyJ[a-zA-Z0-9_-]*\.[a-zA-Z0-9_-]*")
                .expect("jwt pattern"),
            group: 0,
        },
    ]
});

struct SensitivePattern {
    #[allow(dead_code)]
    name: &'static str,
    regex: Regex,
    group: usize,
}

/// Masks a phone number for logging.
///
/// Keeps the first two and last two characters and replaces everything in
/// between with `*`. Numbers of four characters or fewer are returned as-is.
///
/// # Example
///
/// ```
/// use dompet_telemetry::masking::mask_phone;
///
/// assert_eq!(mask_phone("08123456789"), "08*******89");
/// assert_eq!(mask_phone("0812"), "0812");
/// ```
#[must_use]
pub fn mask_phone(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() <= PHONE_VISIBLE * 2 {
        return phone.to_string();
    }
    let hidden = chars.len() - PHONE_VISIBLE * 2;
    let mut masked = String::with_capacity(phone.len());
    masked.extend(&chars[..PHONE_VISIBLE]);
    masked.extend(std::iter::repeat_n('*', hidden));
    masked.extend(&chars[chars.len() - PHONE_VISIBLE..]);
    masked
}

/// Masks sensitive data in strings.
#[derive(Debug, Clone)]
pub struct SensitiveDataMasker {
    /// Values shorter than this are fully masked
    min_length: usize,
    /// Characters to show at start of masked value
    show_start: usize,
    /// Characters to show at end of masked value
    show_end: usize,
    mask_char: char,
}

impl Default for SensitiveDataMasker {
    fn default() -> Self {
        Self::new()
    }
}

impl SensitiveDataMasker {
    /// Creates a masker with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            min_length: 8,
            show_start: 3,
            show_end: 3,
            mask_char: '*',
        }
    }

    /// Creates a masker with custom settings.
    #[must_use]
    pub fn with_settings(min_length: usize, show_start: usize, show_end: usize) -> Self {
        Self {
            min_length,
            show_start,
            show_end,
            mask_char: '*',
        }
    }

    /// Masks a known sensitive value.
    ///
    /// ```
    /// use dompet_telemetry::masking::SensitiveDataMasker;
    ///
    /// let masker = SensitiveDataMasker::new();
    /// assert_eq!(masker.mask_value("abcdefghijklmnop"), "abc***nop");
    /// assert_eq!(masker.mask_value("123456"), "******");
    /// ```
    #[must_use]
    pub fn mask_value(&self, value: &str) -> String {
        let chars: Vec<char> = value.chars().collect();
        let mask = self.mask_char.to_string();
        if chars.len() < self.min_length || chars.len() <= self.show_start + self.show_end {
            return mask.repeat(chars.len().max(3));
        }

        let start: String = chars[..self.show_start].iter().collect();
        let end: String = chars[chars.len() - self.show_end..].iter().collect();
        format!("{start}{}{end}", mask.repeat(3))
    }

    /// Masks OTP codes, passwords, and tokens found in `input`.
    ///
    /// ```
    /// use dompet_telemetry::masking::SensitiveDataMasker;
    ///
    /// let masker = SensitiveDataMasker::new();
    /// let masked = masker.mask_string(r#"{"otp": "123456"}"#);
    /// assert!(!masked.contains("123456"));
    /// ```
    #[must_use]
    pub fn mask_string<'a>(&self, input: &'a str) -> Cow<'a, str> {
        let mut result = input.to_string();
        let mut modified = false;

        for pattern in PATTERNS.iter() {
            let secrets: Vec<String> = pattern
                .regex
                .captures_iter(&result)
                .filter_map(|c| c.get(pattern.group).map(|m| m.as_str().to_string()))
                .collect();
            for secret in secrets {
                let masked = self.mask_value(&secret);
                result = result.replace(&secret, &masked);
                modified = true;
            }
        }

        if modified {
            Cow::Owned(result)
        } else {
            Cow::Borrowed(input)
        }
    }

    /// Returns true if `input` matches any sensitive pattern.
    #[must_use]
    pub fn contains_sensitive(&self, input: &str) -> bool {
        PATTERNS.iter().any(|p| p.regex.is_match(input))
    }
}

/// A wrapper type for sensitive values that masks them in Display/Debug.
#[derive(Clone)]
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    /// Wraps a value as sensitive.
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Returns the inner value.
    pub fn expose(&self) -> &T {
        &self.0
    }

    /// Consumes and returns the inner value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> std::fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl<T> std::fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl<T: serde::Serialize> serde::Serialize for Sensitive<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str("[REDACTED]")
    }
}
