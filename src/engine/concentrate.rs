// ==========================================
// EngordaPro 育肥管理系统 - 精料量计算与饲喂说明渲染
// ==========================================
// 规则:
// - 日精料量 = 总活重 × 2%（存储不取整，展示保留一位小数）
// - 模板渲染为固定短语的精确替换，不是通用分数解析
// - 结构化渲染按 FeedFraction 标记计算，不依赖短语匹配
// ==========================================

use crate::domain::adaptation::MealPlan;
use crate::domain::types::FeedFraction;

/// 日精料量占总活重比例
pub const CONCENTRATE_RATIO: f64 = 0.02;

/// 日精料量 (kg)
///
/// 前置条件: total_weight 为有限非负数（由 API 层校验）
pub fn daily_concentrate(total_weight: f64) -> f64 {
    total_weight * CONCENTRATE_RATIO
}

/// 保留一位小数，恰好处于中点时远离零取整
///
/// 与 `{:.1}` 的区别只在精确中点 (x.x5 可精确表示时，如 0.25)
pub fn format_one_decimal(value: f64) -> String {
    let quarters = value * 4.0;
    let is_exact_tie = quarters.fract() == 0.0 && quarters % 2.0 != 0.0;
    if is_exact_tie {
        format!("{:.1}", (value * 10.0).round() / 10.0)
    } else {
        format!("{:.1}", value)
    }
}

// 替换顺序与短语一一对应；"Oferecer ..." 前缀随 "do concentrado" 一并处理
fn substitutions(daily: f64) -> [(&'static str, String); 5] {
    let quarter = format!("{}kg de concentrado", format_one_decimal(daily / 4.0));
    let half = format!("{}kg de concentrado", format_one_decimal(daily / 2.0));
    [
        ("1/4 do concentrado", quarter.clone()),
        ("2/4 do concentrado", half.clone()),
        ("1/4 concentrado", quarter),
        ("2/4 concentrado", half),
        (
            "Concentrado à vontade",
            format!("{}kg de concentrado à vontade", format_one_decimal(daily)),
        ),
    ]
}

/// 将模板中的份额短语替换为具体公斤数
///
/// 可识别短语（大小写敏感）:
/// - "1/4 concentrado" / "1/4 do concentrado" → 日精料量/4
/// - "2/4 concentrado" / "2/4 do concentrado" → 日精料量/2
/// - "Concentrado à vontade" → 日精料量全量
///
/// 其他写法原样保留
pub fn render_instruction(template: &str, total_weight: f64) -> String {
    let daily = daily_concentrate(total_weight);
    substitutions(daily)
        .iter()
        .fold(template.to_string(), |text, (phrase, replacement)| {
            text.replace(phrase, replacement)
        })
}

/// 结构化渲染单个份额
pub fn render_fraction(fraction: FeedFraction, total_weight: f64) -> String {
    let kg = format_one_decimal(fraction.amount(daily_concentrate(total_weight)));
    match fraction {
        FeedFraction::FreeChoice => format!("{}kg de concentrado à vontade", kg),
        FeedFraction::Quarter | FeedFraction::Half => format!("{}kg de concentrado", kg),
    }
}

/// 结构化渲染一餐: 有份额标记时按标记渲染，否则原文输出
pub fn render_meal(meal: &MealPlan, total_weight: f64) -> String {
    match meal.fraction {
        Some(fraction) => meal
            .template
            .replacen(
                meal_phrase(meal.template, fraction),
                &render_fraction(fraction, total_weight),
                1,
            ),
        None => meal.template.to_string(),
    }
}

// 餐次原文中份额所在的短语
fn meal_phrase(template: &str, fraction: FeedFraction) -> &'static str {
    match fraction {
        FeedFraction::Quarter if template.contains("1/4 do concentrado") => "1/4 do concentrado",
        FeedFraction::Quarter => "1/4 concentrado",
        FeedFraction::Half if template.contains("2/4 do concentrado") => "2/4 do concentrado",
        FeedFraction::Half => "2/4 concentrado",
        FeedFraction::FreeChoice => "Concentrado à vontade",
    }
}
