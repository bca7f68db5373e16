#[cfg(test)]
mod tests {
    use social_spike_rates::channels::ChannelKey;
    use social_spike_rates::error::ChannelError;

    #[test]
    fn test_parse_raw_channel() -> Result<(), ChannelError> {
        assert_eq!(ChannelKey::parse_raw("C-003")?, ChannelKey::Raw(3));
        assert_eq!(ChannelKey::parse_raw("C-021")?, ChannelKey::Raw(21));
        assert_eq!(ChannelKey::parse_raw("AD-7")?, ChannelKey::Raw(7));

        Ok(())
    }

    #[test]
    fn test_parse_unit_key() -> Result<(), ChannelError> {
        assert_eq!(
            ChannelKey::parse_unit_key("elec_C003_unit1")?,
            ChannelKey::Unit { channel: 3, unit: 1 },
        );
        assert_eq!(
            ChannelKey::parse_unit_key("elec_C3_unit12")?,
            ChannelKey::Unit { channel: 3, unit: 12 },
        );

        Ok(())
    }

    #[test]
    fn test_leading_zeros_are_irrelevant() -> Result<(), ChannelError> {
        let raw = ChannelKey::parse_raw("C-003")?;
        let padded = ChannelKey::parse_unit_key("elec_C003_unit1")?;
        let unpadded = ChannelKey::parse_unit_key("elec_C3_unit1")?;

        assert_eq!(padded, unpadded);
        assert!(raw.same_electrode(&padded));
        assert!(raw.same_electrode(&unpadded));

        Ok(())
    }

    #[test]
    fn test_unit_distinctions_preserved_within_sorted_namespace() -> Result<(), ChannelError> {
        let unit_1 = ChannelKey::parse_unit_key("elec_C003_unit1")?;
        let unit_2 = ChannelKey::parse_unit_key("elec_C003_unit2")?;

        assert_ne!(unit_1, unit_2);
        assert!(unit_1.same_electrode(&unit_2));

        Ok(())
    }

    #[test]
    fn test_raw_and_unit_keys_are_distinct_in_maps() -> Result<(), ChannelError> {
        let raw = ChannelKey::parse_raw("C-003")?;
        let unit = ChannelKey::parse_unit_key("elec_C003_unit1")?;

        assert_ne!(raw, unit);
        assert!(raw.same_electrode(&unit));
        assert_eq!(raw.channel_number(), 3);
        assert_eq!(unit.channel_number(), 3);

        Ok(())
    }

    #[test]
    fn test_invalid_raw_tokens_name_the_offending_value() {
        for token in ["003", "C003", "-003", "C-", "C-a3", ""] {
            let result = ChannelKey::parse_raw(token);

            assert_eq!(result, Err(ChannelError::InvalidRawChannel(token.to_string())));

            let message = format!("{}", result.unwrap_err());
            assert!(message.contains(token));
        }
    }

    #[test]
    fn test_invalid_unit_keys_name_the_offending_value() {
        for key in ["elec", "elec_C003", "elec_003_unit1", "elec_C_unit1", "elec_C003_unit"] {
            let result = ChannelKey::parse_unit_key(key);

            assert_eq!(result, Err(ChannelError::InvalidUnitKey(key.to_string())));

            let message = format!("{}", result.unwrap_err());
            assert!(message.contains(key));
        }
    }

    #[test]
    fn test_display_round_trips() -> Result<(), ChannelError> {
        let raw = ChannelKey::Raw(3);
        assert_eq!(format!("{}", raw), "C-003");
        assert_eq!(ChannelKey::parse_raw(&format!("{}", raw))?, raw);

        let unit = ChannelKey::Unit { channel: 12, unit: 2 };
        assert_eq!(format!("{}", unit), "elec_C012_unit2");
        assert_eq!(ChannelKey::parse_unit_key(&format!("{}", unit))?, unit);

        Ok(())
    }
}
