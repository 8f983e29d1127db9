use crate::{keccak256, Address, Error};

/// Parses a hex address, with or without the `0x` prefix.
///
/// All-lowercase and all-uppercase inputs are accepted as is. Mixed-case inputs are treated as
/// EIP-55 checksummed and rejected with [`Error::BadChecksum`] if the casing doesn't match.
pub fn parse_address(s: &str) -> Result<Address, Error> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    if digits.len() != 40 {
        return Err(Error::InvalidAddress(s.to_owned()));
    }

    let mut address = [0; 20];
    hex::decode_to_slice(digits, &mut address).map_err(|_| Error::InvalidAddress(s.to_owned()))?;

    let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper && to_checksum(&address)[2..] != *digits {
        return Err(Error::BadChecksum(s.to_owned()));
    }

    Ok(address)
}

/// Renders `address` in its EIP-55 mixed-case checksum form.
pub fn to_checksum(address: &Address) -> String {
    let lowercase = hex::encode(address);
    let hash = keccak256([lowercase.as_bytes()]);

    let mut checksummed = String::with_capacity(42);
    checksummed.push_str("0x");
    for (i, c) in lowercase.chars().enumerate() {
        let nibble = if i % 2 == 0 {
            hash[i / 2] >> 4
        } else {
            hash[i / 2] & 0x0f
        };
        if nibble >= 8 {
            checksummed.push(c.to_ascii_uppercase());
        } else {
            checksummed.push(c);
        }
    }
    checksummed
}
