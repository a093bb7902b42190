//! Human-readable byte sizes

use humansize::{BINARY, FixedAt, FormatSizeOptions};

const TIB: u64 = 1 << 40;

/// Format a byte count with binary prefixes
///
/// Counts below 1 KiB are printed as integers; anything larger uses two
/// decimals against the largest unit not exceeding the count. TiB is the
/// last unit.
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} B");
    }

    let mut options: FormatSizeOptions = BINARY.decimal_places(2).decimal_zeroes(2);
    if bytes >= TIB {
        options = options.fixed_at(Some(FixedAt::Tera));
    }
    humansize::format_size(bytes, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KIB: u64 = 1024;
    const MIB: u64 = KIB * 1024;
    const GIB: u64 = MIB * 1024;

    fn parse_back(formatted: &str) -> f64 {
        let (value, unit) = formatted.split_once(' ').unwrap();
        let value: f64 = value.parse().unwrap();
        let scale = match unit {
            "B" => 1,
            "KiB" => KIB,
            "MiB" => MIB,
            "GiB" => GIB,
            "TiB" => TIB,
            other => panic!("unexpected unit {other}"),
        };
        value * scale as f64
    }

    #[test]
    fn test_bytes() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1), "1 B");
        assert_eq!(format_size(1023), "1023 B");
    }

    #[test]
    fn test_unit_boundaries() {
        assert_eq!(format_size(KIB), "1.00 KiB");
        assert_eq!(format_size(MIB - 1), "1024.00 KiB");
        assert_eq!(format_size(MIB), "1.00 MiB");
        assert_eq!(format_size(GIB - 1), "1024.00 MiB");
        assert_eq!(format_size(GIB), "1.00 GiB");
        assert_eq!(format_size(TIB), "1.00 TiB");
    }

    #[test]
    fn test_fractional() {
        assert_eq!(format_size(1536), "1.50 KiB");
        assert_eq!(format_size(5 * MIB), "5.00 MiB");
        assert_eq!(format_size(5 * MIB + 512 * KIB), "5.50 MiB");
        assert_eq!(format_size(123_456_789), "117.74 MiB");
    }

    #[test]
    fn test_tib_has_no_ceiling() {
        assert_eq!(format_size(2048 * TIB), "2048.00 TiB");
        assert_eq!(format_size(u64::MAX), "16777216.00 TiB");
    }

    #[test]
    fn test_parses_back_within_tolerance() {
        let samples = [
            0,
            512,
            1023,
            1024,
            1025,
            4097,
            999_999,
            MIB + 1,
            123_456_789,
            7 * GIB + 3,
            3 * TIB + 17,
            u64::MAX / 3,
        ];
        for n in samples {
            let back = parse_back(&format_size(n));
            if n < 1024 {
                assert_eq!(back, n as f64, "{n}");
            } else {
                let error = (back - n as f64).abs() / n as f64;
                assert!(error <= 0.005, "{n} -> {back} ({error})");
            }
        }
    }
}
