use bsviz::input::*;

#[cfg(test)]
mod parse_array_tests {
    use super::*;

    #[test]
    fn test_integers() {
        assert_eq!(parse_array("5 3 1 4"), Ok(vec![5.0, 3.0, 1.0, 4.0]));
    }

    #[test]
    fn test_mixed_whitespace_and_floats() {
        let parsed = parse_array("  1.5\t-2\n 3e2   0.25 ").unwrap();
        assert_eq!(parsed, vec![1.5, -2.0, 300.0, 0.25]);
    }

    #[test]
    fn test_length_and_values_preserved() {
        let tokens = (0..50).map(|i| (i * 7 % 13) as f64 - 6.5).collect::<Vec<f64>>();
        let text = tokens
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<String>>()
            .join(" ");
        let parsed = parse_array(&text).unwrap();
        assert_eq!(parsed.len(), tokens.len());
        assert_eq!(parsed, tokens);
    }

    #[test]
    fn test_empty_array() {
        assert_eq!(parse_array(""), Err(InputError::EmptyArray));
        assert_eq!(parse_array("   \t"), Err(InputError::EmptyArray));
    }

    #[test]
    fn test_single_bad_token_fails() {
        assert_eq!(
            parse_array("1 2 x 4"),
            Err(InputError::InvalidArray("x".to_string()))
        );
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(matches!(parse_array("1 inf"), Err(InputError::InvalidArray(_))));
        assert!(matches!(parse_array("NaN"), Err(InputError::InvalidArray(_))));
    }

    #[test]
    fn test_error_message_mentions_array() {
        let err = parse_array("1 two").unwrap_err();
        assert!(err.to_string().starts_with("Invalid array input"));
    }
}

#[cfg(test)]
mod parse_target_tests {
    use super::*;

    #[test]
    fn test_integer_and_float() {
        assert_eq!(parse_target("4"), Ok(4.0));
        assert_eq!(parse_target(" -0.5 "), Ok(-0.5));
    }

    #[test]
    fn test_empty_target() {
        assert_eq!(parse_target(" "), Err(InputError::EmptyTarget));
        assert_eq!(
            InputError::EmptyTarget.to_string(),
            "Please enter a target value."
        );
    }

    #[test]
    fn test_two_tokens_is_not_a_number() {
        assert_eq!(
            parse_target("4 5"),
            Err(InputError::InvalidTarget("4 5".to_string()))
        );
    }
}

#[cfg(test)]
mod parse_inputs_tests {
    use super::*;

    #[test]
    fn test_array_checked_first() {
        assert_eq!(parse_inputs("", ""), Err(InputError::EmptyArray));
        assert_eq!(parse_inputs("1 2", ""), Err(InputError::EmptyTarget));
    }

    #[test]
    fn test_valid_pair() {
        assert_eq!(parse_inputs("1 2 3", "2"), Ok((vec![1.0, 2.0, 3.0], 2.0)));
    }
}
