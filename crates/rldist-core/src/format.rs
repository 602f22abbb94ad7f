//! Legend and annotation text

/// Compress integers into comma-separated ranges of consecutive values
///
/// The input is sorted and deduplicated first, so `[5, 1, 2, 3]` and
/// `[1, 2, 3, 5]` both give `1-3,5`. Two consecutive values form a range
/// too (`7-8`).
pub fn consecutive_numbers<I>(ids: I) -> String
where
    I: IntoIterator<Item = u32>,
{
    let mut ids: Vec<u32> = ids.into_iter().collect();
    ids.sort_unstable();
    ids.dedup();

    let mut parts = Vec::new();
    let mut iter = ids.into_iter().peekable();
    while let Some(start) = iter.next() {
        let mut end = start;
        while iter.peek() == Some(&(end + 1)) {
            end += 1;
            iter.next();
        }
        if start == end {
            parts.push(start.to_string());
        } else {
            parts.push(format!("{start}-{end}"));
        }
    }
    parts.join(",")
}

/// Annotation naming the functions of a panel, e.g. `f1-3,5,20-D`
pub fn functions_annotation<I>(ids: I, dim: Option<u32>) -> String
where
    I: IntoIterator<Item = u32>,
{
    let mut text = format!("f{}", consecutive_numbers(ids));
    if let Some(dim) = dim {
        text.push_str(&format!(",{dim}-D"));
    }
    text
}

/// Legend label with the number of solved functions, e.g. `1e-01: 7/15`
pub fn solved_label(label: &str, solved: usize, total: usize) -> String {
    format!("{label}: {solved}/{total}")
}

/// Format a positive value as `<mantissa>e<sign><two-digit exponent>`
///
/// The mantissa is rounded to an integer: `1e-8` gives `1e-08`, `10`
/// gives `1e+01`, `0.03` gives `3e-02`. Other values fall back to the
/// plain representation.
pub fn power_of_ten_label(value: f64) -> String {
    if !value.is_finite() || value <= 0.0 {
        return format!("{value}");
    }
    let mut exponent = value.log10().floor() as i32;
    let mut mantissa = (value / 10f64.powi(exponent)).round() as i64;
    if mantissa >= 10 {
        mantissa /= 10;
        exponent += 1;
    }
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exponent.abs())
}
