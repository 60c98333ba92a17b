//! Block shapes: slots, fields, output types and which blocks each editor level offers.

use crate::ast::Value;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

mod math;
mod standard;

/// Variable named by a variable block whose `VAR` field was never set.
pub const DEFAULT_VARIABLE: &str = "item";

/// Editor profile. Each level offers its own set of blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// General-purpose editor without math-specific blocks.
    Genel,
    #[default]
    Ilkokul,
    Ortaokul,
    Lise,
}

impl Level {
    pub const ALL: [Level; 4] = [Level::Genel, Level::Ilkokul, Level::Ortaokul, Level::Lise];

    pub fn groups(&self) -> &'static [BlockGroup] {
        match self {
            Level::Genel => &[BlockGroup::Standard, BlockGroup::Genel],
            Level::Ilkokul => &[BlockGroup::Standard, BlockGroup::Common, BlockGroup::Ilkokul],
            Level::Ortaokul => &[BlockGroup::Standard, BlockGroup::Common, BlockGroup::Ortaokul],
            Level::Lise => &[BlockGroup::Standard, BlockGroup::Common, BlockGroup::Lise],
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Level::Genel => "Genel",
            Level::Ilkokul => "İlkokul",
            Level::Ortaokul => "Ortaokul",
            Level::Lise => "Lise",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Level::Genel => "genel",
            Level::Ilkokul => "ilkokul",
            Level::Ortaokul => "ortaokul",
            Level::Lise => "lise",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "genel" | "general" => Ok(Level::Genel),
            "ilkokul" | "elementary" => Ok(Level::Ilkokul),
            "ortaokul" | "middle" => Ok(Level::Ortaokul),
            "lise" | "high" => Ok(Level::Lise),
            other => Err(format!("unknown level '{}'", other)),
        }
    }
}

/// Toolbox family a block belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockGroup {
    Standard,
    Genel,
    Common,
    Ilkokul,
    Ortaokul,
    Lise,
}

/// Type carried by a connection. `Any` connects to everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Number,
    String,
    Boolean,
    Array,
    Any,
}

impl ValueType {
    pub fn accepts(&self, found: ValueType) -> bool {
        *self == ValueType::Any || found == ValueType::Any || *self == found
    }

    /// Literal used when a slot of this type is left empty.
    pub fn default_literal(&self) -> Value {
        match self {
            ValueType::Number | ValueType::Any => Value::Number(0.0),
            ValueType::String => Value::Text(String::new()),
            ValueType::Boolean => Value::Bool(false),
            ValueType::Array => Value::List(Vec::new()),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Number => "Number",
            ValueType::String => "String",
            ValueType::Boolean => "Boolean",
            ValueType::Array => "Array",
            ValueType::Any => "any",
        };
        write!(f, "{}", name)
    }
}

/// How a block connects to its surroundings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockShape {
    /// Chains with previous/next statements.
    Statement,
    /// Plugs into a value slot.
    Output(ValueType),
    /// Either, depending on a dropdown (e.g. list removal).
    Flexible(ValueType),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SlotKind {
    Value { check: ValueType, default: Value },
    Field { default: String, options: Vec<&'static str> },
    Statement,
}

/// A named input of a block. Names ending in `#` stand for a numbered family
/// (`ADD#` covers `ADD0`, `ADD1`, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub name: &'static str,
    pub kind: SlotKind,
}

impl Slot {
    fn matches(&self, name: &str) -> bool {
        match self.name.strip_suffix('#') {
            Some(prefix) => name
                .strip_prefix(prefix)
                .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit())),
            None => self.name == name,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockDefinition {
    pub block_type: String,
    pub group: BlockGroup,
    pub shape: BlockShape,
    pub slots: Vec<Slot>,
}

impl BlockDefinition {
    pub fn statement(block_type: &str, group: BlockGroup) -> Self {
        Self {
            block_type: block_type.to_string(),
            group,
            shape: BlockShape::Statement,
            slots: Vec::new(),
        }
    }

    pub fn output(block_type: &str, group: BlockGroup, output: ValueType) -> Self {
        Self {
            shape: BlockShape::Output(output),
            ..Self::statement(block_type, group)
        }
    }

    pub fn flexible(block_type: &str, group: BlockGroup, output: ValueType) -> Self {
        Self {
            shape: BlockShape::Flexible(output),
            ..Self::statement(block_type, group)
        }
    }

    /// Value slot whose default comes from its type.
    pub fn value(self, name: &'static str, check: ValueType) -> Self {
        let default = check.default_literal();
        self.value_with_default(name, check, default)
    }

    pub fn value_with_default(
        mut self,
        name: &'static str,
        check: ValueType,
        default: impl Into<Value>,
    ) -> Self {
        self.slots.push(Slot {
            name,
            kind: SlotKind::Value {
                check,
                default: default.into(),
            },
        });
        self
    }

    /// Free-form field (text, number or variable name).
    pub fn field(mut self, name: &'static str, default: &str) -> Self {
        self.slots.push(Slot {
            name,
            kind: SlotKind::Field {
                default: default.to_string(),
                options: Vec::new(),
            },
        });
        self
    }

    /// Dropdown field; the first option is the default.
    pub fn dropdown(mut self, name: &'static str, options: &[&'static str]) -> Self {
        self.slots.push(Slot {
            name,
            kind: SlotKind::Field {
                default: options.first().map(|s| s.to_string()).unwrap_or_default(),
                options: options.to_vec(),
            },
        });
        self
    }

    pub fn statement_input(mut self, name: &'static str) -> Self {
        self.slots.push(Slot {
            name,
            kind: SlotKind::Statement,
        });
        self
    }

    pub fn slot(&self, name: &str) -> Option<&Slot> {
        self.slots
            .iter()
            .find(|slot| slot.name == name)
            .or_else(|| self.slots.iter().find(|slot| slot.matches(name)))
    }

    /// Default literal of a value slot.
    pub fn default_value(&self, name: &str) -> Option<&Value> {
        match self.slot(name).map(|slot| &slot.kind) {
            Some(SlotKind::Value { default, .. }) => Some(default),
            _ => None,
        }
    }

    /// Default text of a field.
    pub fn default_field(&self, name: &str) -> Option<&str> {
        match self.slot(name).map(|slot| &slot.kind) {
            Some(SlotKind::Field { default, .. }) => Some(default.as_str()),
            _ => None,
        }
    }

    pub fn is_expression(&self) -> bool {
        !matches!(self.shape, BlockShape::Statement)
    }
}

/// All block definitions offered at one level, in toolbox order.
#[derive(Debug, Clone)]
pub struct BlockCatalog {
    level: Level,
    definitions: AHashMap<String, BlockDefinition>,
    order: Vec<String>,
}

impl BlockCatalog {
    pub fn for_level(level: Level) -> Self {
        let mut catalog = Self {
            level,
            definitions: AHashMap::new(),
            order: Vec::new(),
        };
        for group in level.groups() {
            let definitions = match group {
                BlockGroup::Standard => standard::standard_blocks(),
                BlockGroup::Genel => standard::genel_blocks(),
                BlockGroup::Common => math::common_blocks(),
                BlockGroup::Ilkokul => math::ilkokul_blocks(),
                BlockGroup::Ortaokul => math::ortaokul_blocks(),
                BlockGroup::Lise => math::lise_blocks(),
            };
            for definition in definitions {
                catalog.insert(definition);
            }
        }
        catalog
    }

    /// Adds or replaces a definition.
    pub fn insert(&mut self, definition: BlockDefinition) {
        if !self.definitions.contains_key(&definition.block_type) {
            self.order.push(definition.block_type.clone());
        }
        self.definitions
            .insert(definition.block_type.clone(), definition);
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn get(&self, block_type: &str) -> Option<&BlockDefinition> {
        self.definitions.get(block_type)
    }

    pub fn contains(&self, block_type: &str) -> bool {
        self.definitions.contains_key(block_type)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BlockDefinition> {
        self.order.iter().filter_map(|name| self.definitions.get(name))
    }
}
