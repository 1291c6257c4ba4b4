//! 查询语言的组件模型
//!
//! 一个子句 `@job.id=412` 经过解析后成为一个 [`Component`]，
//! 一次解析得到的所有组件收集在按物种去重的 [`ComponentSet`] 中。

use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::token::Span;

/// 子句的原始捕获，三段文本都直接切自输入
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clause<'a> {
    pub species: &'a str,
    pub column: &'a str,
    pub digits: &'a str,
    /// 整个子句（从 `@` 到最后一个数字）在输入中的位置
    pub span: Span,
}

/// 子句针对的实体种类，例如 `Job`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Species(pub String);

impl Species {
    pub fn name(&self) -> &str {
        &self.0
    }
}

/// 实体内被过滤的字段名，例如 `id`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Column(pub String);

impl Column {
    pub fn name(&self) -> &str {
        &self.0
    }
}

/// 子句的比较/运算命令
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Equals, // =
    Add,    // +
    Sub,    // -
    Mult,   // x
    Div,    // /
}

impl Command {
    /// 命令的规范单字符符号
    pub fn symbol(&self) -> char {
        match self {
            Command::Equals => '=',
            Command::Add => '+',
            Command::Sub => '-',
            Command::Mult => 'x',
            Command::Div => '/',
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '=' => Some(Command::Equals),
            '+' => Some(Command::Add),
            '-' => Some(Command::Sub),
            'x' => Some(Command::Mult),
            '/' => Some(Command::Div),
            _ => None,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// 一个解析并校验过的子句
///
/// 相等性与哈希只看 `species`：同一物种的第二个子句在 [`ComponentSet`] 中会被丢弃，
/// 即使字段或值不同。
#[derive(Debug, Clone)]
pub struct Component {
    pub species: Species,
    pub column: Column,
    pub command: Command,
    pub value: Option<i64>,
    is_valid: bool,
}

impl Component {
    pub fn new(species: Species, column: Column, command: Command, value: Option<i64>) -> Self {
        let is_valid = !species.0.is_empty() && !column.0.is_empty() && value.is_some();
        Self {
            species,
            column,
            command,
            value,
            is_valid,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }
}

impl PartialEq for Component {
    fn eq(&self, other: &Self) -> bool {
        self.species == other.species
    }
}

impl Eq for Component {}

impl Hash for Component {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.species.hash(state);
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}.{}{}", self.species.0, self.column.0, self.command)?;
        match self.value {
            Some(value) => write!(f, "{}", value),
            None => write!(f, "?"),
        }
    }
}

/// 按物种去重的组件集合
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentSet {
    components: HashSet<Component>,
}

impl ComponentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入组件；若同一物种已存在则保留原有组件并返回 `false`
    pub fn insert(&mut self, component: Component) -> bool {
        self.components.insert(component)
    }

    /// 按物种名查找组件
    pub fn get(&self, species: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.species.0 == species)
    }

    pub fn contains_species(&self, species: &str) -> bool {
        self.get(species).is_some()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.components.iter()
    }
}

impl<'a> IntoIterator for &'a ComponentSet {
    type Item = &'a Component;
    type IntoIter = std::collections::hash_set::Iter<'a, Component>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.iter()
    }
}

impl FromIterator<Component> for ComponentSet {
    fn from_iter<I: IntoIterator<Item = Component>>(iter: I) -> Self {
        let mut set = ComponentSet::new();
        for component in iter {
            set.insert(component);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(column: &str, value: Option<i64>) -> Component {
        Component::new(
            Species("Job".to_string()),
            Column(column.to_string()),
            Command::Equals,
            value,
        )
    }

    #[test]
    fn test_validity() {
        assert!(job("id", Some(1)).is_valid());
        assert!(!job("id", None).is_valid());
        assert!(!job("", Some(1)).is_valid());

        let no_species = Component::new(
            Species(String::new()),
            Column("id".to_string()),
            Command::Equals,
            Some(1),
        );
        assert!(!no_species.is_valid());
    }

    #[test]
    fn test_equality_by_species_only() {
        assert_eq!(job("id", Some(1)), job("title", Some(2)));

        let task = Component::new(
            Species("Task".to_string()),
            Column("id".to_string()),
            Command::Equals,
            Some(1),
        );
        assert_ne!(job("id", Some(1)), task);
    }

    #[test]
    fn test_set_keeps_first_component_per_species() {
        let mut set = ComponentSet::new();
        assert!(set.insert(job("id", Some(1))));
        assert!(!set.insert(job("id", Some(2))));

        assert_eq!(set.len(), 1);
        assert_eq!(set.get("Job").unwrap().value, Some(1));
    }

    #[test]
    fn test_command_symbols() {
        for command in [
            Command::Equals,
            Command::Add,
            Command::Sub,
            Command::Mult,
            Command::Div,
        ] {
            assert_eq!(Command::from_symbol(command.symbol()), Some(command));
        }
        assert_eq!(Command::from_symbol('%'), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(job("id", Some(412)).to_string(), "@Job.id=412");
        assert_eq!(job("id", None).to_string(), "@Job.id=?");
    }
}
