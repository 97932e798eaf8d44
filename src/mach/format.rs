use super::Val;

/// ## PRINT USING pictures
///
/// `#` reserves a digit and `.` splits the integer and fraction widths.
/// A `,` in the integer part turns on thousands grouping and widens the
/// field by one. A leading `$` is printed in front of the field.
/// Numbers too wide for the field are printed in full.

#[derive(Debug, PartialEq)]
pub struct Picture {
    prefix: String,
    integer: usize,
    fraction: Option<usize>,
    grouping: bool,
}

impl Picture {
    pub fn new(picture: &str) -> Picture {
        let prefix: String = picture.chars().take_while(|&c| c == '$').collect();
        let body = &picture[prefix.len()..];
        let (int_part, frac_part) = match body.find('.') {
            Some(idx) => (&body[..idx], Some(&body[idx + 1..])),
            None => (body, None),
        };
        let commas = int_part.matches(',').count();
        Picture {
            prefix,
            integer: int_part.matches('#').count() + commas,
            fraction: frac_part.map(|f| f.matches('#').count()),
            grouping: commas > 0,
        }
    }

    fn width(&self) -> usize {
        match self.fraction {
            Some(f) => self.integer + 1 + f,
            None => self.integer,
        }
    }

    pub fn format(&self, val: &Val) -> String {
        let n = match val {
            Val::Integer(n) => *n as f64,
            Val::Real(n) => *n as f64,
            _ => return val.to_string(),
        };
        let digits = match self.fraction {
            Some(f) => format!("{:.*}", f, n.abs()),
            None => format!("{:.0}", n.abs()),
        };
        let (int_digits, frac_digits) = match digits.find('.') {
            Some(idx) => (&digits[..idx], &digits[idx..]),
            None => (digits.as_str(), ""),
        };
        let mut s = String::new();
        if n < 0.0 && digits.chars().any(|c| c != '0' && c != '.') {
            s.push('-');
        }
        if self.grouping {
            s.push_str(&group(int_digits));
        } else {
            s.push_str(int_digits);
        }
        s.push_str(frac_digits);
        format!("{}{:>width$}", self.prefix, s, width = self.width())
    }
}

fn group(digits: &str) -> String {
    let mut s = String::new();
    let len = digits.len();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            s.push(',');
        }
        s.push(ch);
    }
    s
}
