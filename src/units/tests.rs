#[cfg(test)]
mod tests {
    use super::super::error::FormattingError;
    use super::super::formatter::to_string;
    use super::super::template::Template;
    use std::thread;

    #[test]
    fn test_fixed_precision_meters() {
        assert_eq!(to_string(3.5, "m", "%.2f %s").unwrap(), "3.50 m");
    }

    #[test]
    fn test_integer_zero_kilograms() {
        assert_eq!(to_string(0, "kg", "%d %s").unwrap(), "0 kg");
    }

    #[test]
    fn test_negative_celsius() {
        let text = to_string(-12.0, "°C", "%.1f %s").unwrap();
        assert_eq!(text, "-12.0 °C");
        // '°' is two bytes in UTF-8
        assert_eq!(text.len(), 9);
    }

    #[test]
    fn test_length_is_exact() {
        let cases: &[(f64, &str, &str, &str)] = &[
            (1.0, "m", "%f %s", "1.000000 m"),
            (2.75, "s", "%.1f%s", "2.8s"),
            (-0.5, "N", "[%8.3f] [%-3s]", "[  -0.500] [N  ]"),
            (1500.0, "Pa", "%g %s", "1500 Pa"),
            (6.02214076e23, "mol⁻¹", "%.3e %s", "6.022e+23 mol⁻¹"),
        ];
        for (value, unit, format, expected) in cases {
            let text = to_string(*value, unit, format).unwrap();
            assert_eq!(&text, expected, "format {:?}", format);
            let template = Template::parse(format).unwrap();
            assert_eq!(template.measure(*value, unit).unwrap(), text.len());
        }
    }

    #[test]
    fn test_repeated_calls_are_independent() {
        let first = to_string(9.81, "m/s²", "%.2f %s").unwrap();
        let second = to_string(9.81, "m/s²", "%.2f %s").unwrap();
        assert_eq!(first, second);
        assert_ne!(first.as_ptr(), second.as_ptr());
    }

    #[test]
    fn test_empty_unit() {
        let text = to_string(4.0, "", "%.1f %s").unwrap();
        assert_eq!(text, "4.0 ");
        assert_eq!(text.len(), 4);

        assert_eq!(to_string(4.0, "", "%.1f%s").unwrap(), "4.0");
    }

    #[test]
    fn test_long_numeric_output_is_not_truncated() {
        let text = to_string(1.0e300, "J", "%f %s").unwrap();
        // 301 integer digits, a point, 6 decimals, a space and the unit
        assert_eq!(text.len(), 301 + 1 + 6 + 2);
        assert!(text.starts_with('1'));
        assert!(text.ends_with(".000000 J"));

        let text = to_string(1.0 / 3.0, "m", "%.40f %s").unwrap();
        assert_eq!(text.len(), 2 + 40 + 2);
        assert!(text.starts_with("0.3333333333333333"));

        let text = to_string(u64::MAX, "B", "%u %s").unwrap();
        assert_eq!(text, "18446744073709551615 B");
    }

    #[test]
    fn test_wide_fields_are_not_truncated() {
        let text = to_string(7, "h", "%500d %s").unwrap();
        assert_eq!(text.len(), 502);
        assert!(text.ends_with("7 h"));
    }

    #[test]
    fn test_mismatched_argument_types_fail() {
        assert!(matches!(
            to_string(3.5, "m", "%d %s"),
            Err(FormattingError::ArgumentMismatch(_))
        ));
        assert!(matches!(
            to_string(3, "m", "%.2f %s"),
            Err(FormattingError::ArgumentMismatch(_))
        ));
        assert!(matches!(
            to_string(3.5, "m", "%s %s"),
            Err(FormattingError::ArgumentMismatch(_))
        ));
        assert!(matches!(
            to_string(3.5, "m", "%f %f"),
            Err(FormattingError::ArgumentMismatch(_))
        ));
    }

    #[test]
    fn test_wrong_number_of_specifiers_fails() {
        assert_eq!(
            to_string(3.5, "m", "%f").unwrap_err(),
            FormattingError::SpecifierCount { found: 1 }
        );
        assert_eq!(
            to_string(3.5, "m", "%f %s %s").unwrap_err(),
            FormattingError::SpecifierCount { found: 3 }
        );
    }

    #[test]
    fn test_concurrent_callers() {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                thread::spawn(move || {
                    (0..100)
                        .map(|j| to_string(i * 100 + j, "u", "%d %s").unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let results = handle.join().unwrap();
            for (j, text) in results.iter().enumerate() {
                assert_eq!(text, &format!("{} u", i * 100 + j));
            }
        }
    }

    #[test]
    fn test_shared_template_across_threads() {
        let template = std::sync::Arc::new(Template::parse("%.3f %s").unwrap());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let template = template.clone();
                thread::spawn(move || template.render(i as f64 + 0.5, "m").unwrap())
            })
            .collect();
        let results: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results, vec!["0.500 m", "1.500 m", "2.500 m", "3.500 m"]);
    }
}
