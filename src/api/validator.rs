// ==========================================
// EngordaPro 育肥管理系统 - 输入校验器
// ==========================================
// 职责: API 边界的入参校验，引擎层只接收合法数据
// 规则:
// - 名称/耳标号/描述/分类不能为空白
// - 体重必须为有限正数
// - 金额必须为有限正数
// ==========================================

use crate::api::error::{ApiError, ApiResult, ValidationViolation};
use crate::i18n::t_with_args;

// ==========================================
// InputValidator - 输入校验器
// ==========================================

/// 输入校验器
///
/// 收集全部违规项后一次性返回，单项违规直接返回 InvalidInput
#[derive(Debug, Default)]
pub struct InputValidator {
    violations: Vec<ValidationViolation>,
}

impl InputValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 必填文本（去除首尾空白后非空）
    pub fn require_text(mut self, field: &str, value: &str) -> Self {
        if value.trim().is_empty() {
            self.push(field, t_with_args("validation.required", &[("field", field)]));
        }
        self
    }

    /// 体重必须为有限正数
    pub fn require_weight(mut self, field: &str, value: f64) -> Self {
        if !is_positive_finite(value) {
            self.push(
                field,
                t_with_args("validation.positive_weight", &[("value", &value.to_string())]),
            );
        }
        self
    }

    /// 金额必须为有限正数
    pub fn require_amount(mut self, field: &str, value: f64) -> Self {
        if !is_positive_finite(value) {
            self.push(
                field,
                t_with_args("validation.positive_amount", &[("value", &value.to_string())]),
            );
        }
        self
    }

    fn push(&mut self, field: &str, reason: String) {
        self.violations.push(ValidationViolation {
            field: field.to_string(),
            reason,
        });
    }

    /// 结束校验
    ///
    /// # 返回
    /// - Ok(()): 无违规
    /// - Err(ApiError::InvalidInput): 单项违规
    /// - Err(ApiError::InputValidationError): 多项违规
    pub fn finish(self) -> ApiResult<()> {
        let mut violations = self.violations;
        match violations.len() {
            0 => Ok(()),
            1 => {
                let violation = violations.remove(0);
                Err(ApiError::InvalidInput(violation.reason))
            }
            n => Err(ApiError::InputValidationError {
                reason: format!("{}个字段校验失败", n),
                violations,
            }),
        }
    }
}

fn is_positive_finite(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// 校验 ID 参数非空
pub fn require_id(field: &str, value: &str) -> ApiResult<()> {
    InputValidator::new().require_text(field, value).finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_input_passes() {
        let result = InputValidator::new()
            .require_text("name", "Lote 1")
            .require_weight("weight", 350.0)
            .require_amount("amount", 0.01)
            .finish();
        assert!(result.is_ok());
    }

    #[test]
    fn test_single_violation_is_invalid_input() {
        let result = InputValidator::new().require_text("tag_number", "   ").finish();
        assert!(matches!(result, Err(ApiError::InvalidInput(_))));
    }

    #[test]
    fn test_weight_rules() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = InputValidator::new().require_weight("weight", bad).finish();
            assert!(result.is_err(), "weight {} should be rejected", bad);
        }
    }

    #[test]
    fn test_multiple_violations_are_collected() {
        let result = InputValidator::new()
            .require_text("description", "")
            .require_text("category", "")
            .require_amount("amount", -5.0)
            .finish();
        match result {
            Err(ApiError::InputValidationError { violations, .. }) => {
                let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
                assert_eq!(fields, vec!["description", "category", "amount"]);
            }
            other => panic!("Expected InputValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_require_id() {
        assert!(require_id("lot_id", "L001").is_ok());
        assert!(require_id("lot_id", "").is_err());
    }
}
