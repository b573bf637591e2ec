// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持葡萄牙语（默认）和英文
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// 注意: 阶段表原文（标签/餐次/说明）为固定葡萄牙语数据，不参与翻译
// ==========================================

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言
///
/// # 参数
/// - locale: 语言代码（"pt-BR" 或 "en"）
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use engorda_pro::i18n::t;
/// let msg = t("common.success");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（带参数）
///
/// # 示例
/// ```no_run
/// use engorda_pro::i18n::t_with_args;
/// let msg = t_with_args("validation.required", &[("field", "name")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

/// 阶段天数徽标（"Dias 1-3" / "Dia 14"）
pub fn day_range_badge(start: u32, end: u32) -> String {
    if start == end {
        t_with_args("protocol.single_day", &[("day", &start.to_string())])
    } else {
        t_with_args(
            "protocol.day_range",
            &[("start", &start.to_string()), ("end", &end.to_string())],
        )
    }
}

/// 适应期状态徽标（"Em adaptação (dia 3 de 15)" / "Adaptação concluída"）
pub fn adaptation_status_badge(day: u32, total: u32, in_adaptation: bool) -> String {
    if in_adaptation {
        t_with_args(
            "protocol.in_adaptation",
            &[("day", &day.to_string()), ("total", &total.to_string())],
        )
    } else {
        t("protocol.completed")
    }
}
