/// Converts a camelCase or PascalCase identifier to snake_case.
///
/// IDLs name instructions in camelCase while selector preimages use the
/// on-chain handler's snake_case name, so both spellings of one operation
/// must map to the same selector.
pub fn snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() {
            let boundary = match chars.get(i.wrapping_sub(1)) {
                Some(prev) if prev.is_lowercase() || prev.is_ascii_digit() => true,
                // End of an uppercase run followed by lowercase ("ABCDef" -> "abc_def")
                Some(prev) if prev.is_uppercase() => {
                    chars.get(i + 1).is_some_and(|next| next.is_lowercase())
                }
                _ => false,
            };
            if boundary {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_converts() {
        assert_eq!(snake_case("createAccount"), "create_account");
        assert_eq!(snake_case("setAuthorityChecked"), "set_authority_checked");
    }

    #[test]
    fn test_snake_case_is_untouched() {
        assert_eq!(snake_case("create_account"), "create_account");
        assert_eq!(snake_case("transfer"), "transfer");
    }

    #[test]
    fn test_pascal_case_and_acronym_runs() {
        assert_eq!(snake_case("CreateAccount"), "create_account");
        assert_eq!(snake_case("parseABIValue"), "parse_abi_value");
    }

    #[test]
    fn test_digits_form_boundaries() {
        assert_eq!(snake_case("tokenV2Swap"), "token_v2_swap");
    }
}
