use anyhow::{anyhow, Context, Result};
use clap::builder::{
    styling::{AnsiColor, Effects},
    Styles,
};

/// Parse a size string with an optional unit suffix into mebibytes.
///
/// Supported formats (case-insensitive, an optional trailing `B`/`iB` is
/// accepted after the unit):
/// - `"512K"` — kibibytes (rounded up to a whole MiB)
/// - `"1024M"` — mebibytes
/// - `"8G"` / `"8GB"` — gibibytes
/// - `"1T"` — tebibytes
/// - `"100"` — mebibytes (default unit)
///
/// # Examples
///
/// ```
/// use runjob::utils::parse_size_mib;
///
/// assert_eq!(parse_size_mib("100").unwrap(), 100);
/// assert_eq!(parse_size_mib("1024M").unwrap(), 1024);
/// assert_eq!(parse_size_mib("2G").unwrap(), 2048);
/// assert_eq!(parse_size_mib("8gb").unwrap(), 8192);
/// ```
pub fn parse_size_mib(size_str: &str) -> Result<u64> {
    let size_str = size_str.trim();

    if size_str.is_empty() {
        return Err(anyhow!("Size cannot be empty"));
    }

    let lower = size_str.to_ascii_lowercase();
    let body = lower
        .strip_suffix("ib")
        .or_else(|| lower.strip_suffix('b'))
        .unwrap_or(lower.as_str());

    let (digits, multiplier_kib) = match body.chars().last() {
        Some('k') => (&body[..body.len() - 1], 1),
        Some('m') => (&body[..body.len() - 1], 1024),
        Some('g') => (&body[..body.len() - 1], 1024 * 1024),
        Some('t') => (&body[..body.len() - 1], 1024 * 1024 * 1024),
        _ => (body, 1024),
    };

    let value = digits
        .trim()
        .parse::<u64>()
        .with_context(|| format!("Invalid size {size_str:?}. Expected formats: 512K, 1024M, 8G, or 100 (MiB)"))?;

    let kib = value
        .checked_mul(multiplier_kib)
        .ok_or_else(|| anyhow!("Size {size_str:?} is too large"))?;
    Ok(kib.div_ceil(1024))
}

/// Format a size in MiB for display (e.g., `"2.5G"`, `"1G"`, `"512M"`).
///
/// # Examples
///
/// ```
/// use runjob::utils::format_mib;
///
/// assert_eq!(format_mib(100), "100M");
/// assert_eq!(format_mib(1024), "1G");
/// assert_eq!(format_mib(2560), "2.5G");
/// ```
pub fn format_mib(memory_mib: u64) -> String {
    if memory_mib >= 1024 {
        let gb = memory_mib as f64 / 1024.0;
        if gb.fract() < 0.01 {
            format!("{:.0}G", gb)
        } else {
            format!("{:.1}G", gb)
        }
    } else {
        format!("{}M", memory_mib)
    }
}

pub const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size_units() {
        assert_eq!(parse_size_mib("1K").unwrap(), 1);
        assert_eq!(parse_size_mib("2048k").unwrap(), 2);
        assert_eq!(parse_size_mib("512M").unwrap(), 512);
        assert_eq!(parse_size_mib("512MiB").unwrap(), 512);
        assert_eq!(parse_size_mib("1G").unwrap(), 1024);
        assert_eq!(parse_size_mib("1T").unwrap(), 1024 * 1024);
    }

    #[test]
    fn test_parse_size_whitespace() {
        assert_eq!(parse_size_mib("  8G  ").unwrap(), 8192);
        assert_eq!(parse_size_mib("16 G").unwrap(), 16384);
    }

    #[test]
    fn test_parse_size_invalid() {
        assert!(parse_size_mib("").is_err());
        assert!(parse_size_mib("   ").is_err());
        assert!(parse_size_mib("G").is_err());
        assert!(parse_size_mib("-1G").is_err());
        assert!(parse_size_mib("eight gigs").is_err());
        assert!(parse_size_mib("99999999999999999999T").is_err());
    }

    #[test]
    fn test_format_mib() {
        assert_eq!(format_mib(0), "0M");
        assert_eq!(format_mib(1023), "1023M");
        assert_eq!(format_mib(8192), "8G");
    }
}
