/// 把字符串开头的十进制整数解析出来，解析失败时返回默认值
///
/// 允许前导空白和正负号，遇到第一个非数字字符即停止。
///
/// # Examples
/// ```
/// use dir_sweeper::utils::to_int;
///
/// assert_eq!(to_int(" 3600s", 0), 3600);
/// assert_eq!(to_int("abc", 42), 42);
/// ```
pub fn to_int(s: &str, default: i64) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return default;
    }

    match digits[..end].parse::<i64>() {
        Ok(v) if negative => -v,
        Ok(v) => v,
        Err(_) => default,
    }
}

/// "true"/"false" 按字面解析，其它非空字符串视为 true
pub fn to_boolean(s: &str) -> bool {
    match s {
        "true" => true,
        "false" => false,
        other => !other.is_empty(),
    }
}

/// 非负整数秒，负数或无法解析时返回 None
pub(crate) fn to_secs(s: &str) -> Option<u64> {
    u64::try_from(to_int(s, -1)).ok()
}
