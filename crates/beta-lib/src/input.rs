/// Keystroke-level filter applied to a text field before an edit is kept.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InputFilter {
    /// Empty, or ASCII digits only.
    Integer,
    /// Empty, or anything that parses as a finite float.
    Float,
    /// Free text.
    Any,
}

impl InputFilter {
    pub fn accepts(&self, candidate: &str) -> bool {
        match self {
            InputFilter::Integer => accepts_integer(candidate),
            InputFilter::Float => accepts_float(candidate),
            InputFilter::Any => true,
        }
    }
}

pub fn accepts_integer(candidate: &str) -> bool {
    candidate.bytes().all(|b| b.is_ascii_digit())
}

pub fn accepts_float(candidate: &str) -> bool {
    if candidate.is_empty() {
        return true;
    }
    // `f64::from_str` also takes "inf"/"nan"; those are words, not numbers.
    if candidate.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return false;
    }
    candidate
        .parse::<f64>()
        .map(|value| value.is_finite())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_filter() {
        assert!(accepts_integer(""));
        assert!(accepts_integer("10000"));
        assert!(!accepts_integer("10a"));
        assert!(!accepts_integer("-1"));
        assert!(!accepts_integer("1.5"));
        assert!(!accepts_integer(" 1"));
    }

    #[test]
    fn float_filter() {
        for ok in ["", "1", "0.5", ".5", "1e-3", "-1", "0.001", "5."] {
            assert!(accepts_float(ok), "{ok} should be accepted");
        }
        for bad in ["abc", "0.5.1", "inf", "NaN", "1e", "-", "1,5", " "] {
            assert!(!accepts_float(bad), "{bad} should be rejected");
        }
    }

    #[test]
    fn any_filter_takes_everything() {
        assert!(InputFilter::Any.accepts("my sample 1"));
        assert!(!InputFilter::Integer.accepts("x"));
    }
}
