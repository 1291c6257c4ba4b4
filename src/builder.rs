//! 组件构建器：把原始子句捕获转换为类型化、已校验的 [`Component`]

use tracing::debug;

use crate::ast::{Clause, Column, Command, Component, Species};

/// 将一个原始捕获构建为组件
///
/// 数字段为空或超出 `i64` 范围时不产生组件，不视为错误。
pub fn build(clause: &Clause<'_>) -> Option<Component> {
    let value = match clause.digits.parse::<i64>() {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(digits = clause.digits, error = %e, "clause value is not a valid integer");
            None
        }
    };

    // 当前语法只认识 '='
    let component = Component::new(
        Species(capitalize(clause.species)),
        Column(clause.column.to_string()),
        Command::Equals,
        value,
    );

    if component.is_valid() {
        Some(component)
    } else {
        debug!(
            species = clause.species,
            column = clause.column,
            start = clause.span.start,
            "dropping invalid component"
        );
        None
    }
}

/// 首字母大写，其余小写：`job`、`JOB` 都规范为 `Job`
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
