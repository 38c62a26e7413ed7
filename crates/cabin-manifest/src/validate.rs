//! Character-class validators for package and dependency names, and
//! for compiler/linker flag strings.

const CPP_KEYWORDS: &[&str] = &[
    "alignas", "alignof", "and", "and_eq", "asm", "auto", "bitand", "bitor", "bool", "break",
    "case", "catch", "char", "char8_t", "char16_t", "char32_t", "class", "compl", "concept",
    "const", "consteval", "constexpr", "constinit", "const_cast", "continue", "co_await",
    "co_return", "co_yield", "decltype", "default", "delete", "do", "double", "dynamic_cast",
    "else", "enum", "explicit", "export", "extern", "false", "float", "for", "friend", "goto",
    "if", "inline", "int", "long", "mutable", "namespace", "new", "noexcept", "not", "not_eq",
    "nullptr", "operator", "or", "or_eq", "private", "protected", "public", "register",
    "reinterpret_cast", "requires", "return", "short", "signed", "sizeof", "static",
    "static_assert", "static_cast", "struct", "switch", "template", "this", "thread_local",
    "throw", "true", "try", "typedef", "typeid", "typename", "union", "unsigned", "using",
    "virtual", "void", "volatile", "wchar_t", "while", "xor", "xor_eq",
];

pub fn validate_package_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("package name must not be empty".to_string());
    }
    if name.chars().count() < 2 {
        return Err("package name must be at least 2 characters".to_string());
    }
    let first = name.chars().next().unwrap();
    if !first.is_ascii_lowercase() {
        return Err("package name must start with a lowercase letter".to_string());
    }
    let last = name.chars().next_back().unwrap();
    if !(last.is_ascii_lowercase() || last.is_ascii_digit()) {
        return Err("package name must end with a letter or digit".to_string());
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
    {
        return Err(
            "package name must contain only lowercase letters, digits, '-', and '_'".to_string(),
        );
    }
    if CPP_KEYWORDS.contains(&name) {
        return Err(format!("package name '{name}' is a C++ keyword"));
    }
    Ok(())
}

pub fn validate_dep_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("dependency name must not be empty".to_string());
    }
    let chars: Vec<char> = name.chars().collect();

    if let Some(&c) = chars.iter().find(|c| !is_allowed_char(**c)) {
        return Err(format!("dependency name contains an invalid character '{c}'"));
    }

    let first = chars[0];
    if !first.is_ascii_alphanumeric() {
        return Err("dependency name must begin with an alphanumeric character".to_string());
    }
    let last = *chars.last().unwrap();
    if !(last.is_ascii_alphanumeric() || last == '+') {
        return Err("dependency name must end with an alphanumeric character or '+'".to_string());
    }

    let plus_positions: Vec<usize> = chars
        .iter()
        .enumerate()
        .filter(|(_, &c)| c == '+')
        .map(|(i, _)| i)
        .collect();
    match plus_positions.len() {
        0 => {}
        2 if plus_positions[1] == plus_positions[0] + 1 => {}
        2 => {
            return Err("the two '+' characters in a dependency name must be consecutive".to_string())
        }
        _ => return Err("dependency name must contain exactly zero or two '+' characters".to_string()),
    }

    for (i, &c) in chars.iter().enumerate() {
        if c != '.' {
            continue;
        }
        let before = i.checked_sub(1).map(|j| chars[j]);
        let after = chars.get(i + 1).copied();
        let flanked_by_digits =
            before.is_some_and(|b| b.is_ascii_digit()) && after.is_some_and(|a| a.is_ascii_digit());
        if !flanked_by_digits {
            return Err("'.' in a dependency name must be flanked by digits on both sides".to_string());
        }
    }

    if chars.iter().filter(|&&c| c == '/').count() > 1 {
        return Err("dependency name must contain at most one '/'".to_string());
    }

    for window in chars.windows(2) {
        let (a, b) = (window[0], window[1]);
        if !a.is_ascii_alphanumeric() && !b.is_ascii_alphanumeric() && !(a == '+' && b == '+') {
            return Err(
                "dependency name must not contain consecutive non-alphanumeric characters".to_string(),
            );
        }
    }

    Ok(())
}

fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '/' | '.' | '+')
}

/// Every compiler/linker flag string must start with `-` and contain
/// only alphanumerics and `-_=+:.` afterward.
pub fn validate_flag(flag: &str) -> Result<(), String> {
    if !flag.starts_with('-') {
        return Err(format!("flag '{flag}' must start with '-'"));
    }
    if !flag[1..]
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '=' | '+' | ':' | '.'))
    {
        return Err(format!("flag '{flag}' contains a disallowed character"));
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn package_name_rules() {
        assert!(validate_package_name("hello-world").is_ok());
        assert!(validate_package_name("a").is_err());
        assert!(validate_package_name("").is_err());
        assert!(validate_package_name("Hello").is_err());
        assert!(validate_package_name("hello-").is_err());
        assert!(validate_package_name("hello world").is_err());
        assert!(validate_package_name("class").is_err());
    }

    #[test]
    fn dep_name_rules() {
        assert!(validate_dep_name("libfoo").is_ok());
        assert!(validate_dep_name("boost-1.82.0").is_ok());
        assert!(validate_dep_name("libc++").is_ok());
        assert!(validate_dep_name("vendor/foo").is_ok());
        assert!(validate_dep_name("").is_err());
        assert!(validate_dep_name("-foo").is_err());
        assert!(validate_dep_name("foo--bar").is_err());
        assert!(validate_dep_name("foo.bar").is_err());
        assert!(validate_dep_name("a/b/c").is_err());
        assert!(validate_dep_name("foo+").is_err());
        assert!(validate_dep_name("foo+bar+").is_err());
    }
}
