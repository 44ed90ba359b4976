// src/template.rs
//! Шаблоны размеров административных единиц
//!
//! Вложенная спецификация точных размеров: лист — размеры графств одного
//! герцогства в клетках, узел — список дочерних шаблонов (герцогства
//! королевства, королевства континента). Шаблон валидируется один раз при
//! загрузке и дальше трактуется как неизменяемый контракт.

use crate::error::TemplateError;
use serde::{Deserialize, Serialize};

/// Рекурсивный шаблон размеров. В TOML/JSON лист — массив чисел,
/// узел — массив вложенных массивов.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SizeTemplate {
    /// Размеры графств одного герцогства, в клетках.
    Leaf(Vec<usize>),
    /// Дочерние шаблоны следующего уровня иерархии.
    Node(Vec<SizeTemplate>),
}

impl SizeTemplate {
    /// Суммарный размер шаблона в клетках.
    #[must_use]
    pub fn total(&self) -> usize {
        match self {
            SizeTemplate::Leaf(sizes) => sizes.iter().sum(),
            SizeTemplate::Node(children) => children.iter().map(SizeTemplate::total).sum(),
        }
    }

    /// Размеры листа, если это лист.
    #[must_use]
    pub fn leaf_sizes(&self) -> Option<&[usize]> {
        match self {
            SizeTemplate::Leaf(sizes) => Some(sizes),
            SizeTemplate::Node(_) => None,
        }
    }

    /// Дочерние шаблоны, если это узел.
    #[must_use]
    pub fn children(&self) -> Option<&[SizeTemplate]> {
        match self {
            SizeTemplate::Leaf(_) => None,
            SizeTemplate::Node(children) => Some(children),
        }
    }

    /// Единоразовая проверка при загрузке: пустые узлы/листья и нулевые
    /// размеры недопустимы на любой глубине.
    pub fn validate(&self) -> Result<(), TemplateError> {
        match self {
            SizeTemplate::Leaf(sizes) => {
                if sizes.is_empty() {
                    return Err(TemplateError::EmptyLeaf);
                }
                if sizes.contains(&0) {
                    return Err(TemplateError::ZeroSize);
                }
                Ok(())
            }
            SizeTemplate::Node(children) => {
                if children.is_empty() {
                    return Err(TemplateError::EmptyNode);
                }
                children.iter().try_for_each(SizeTemplate::validate)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_is_recursive() {
        let kingdom = SizeTemplate::Node(vec![
            SizeTemplate::Leaf(vec![6, 4]),
            SizeTemplate::Leaf(vec![5, 5]),
        ]);
        assert_eq!(kingdom.total(), 20);
        assert_eq!(SizeTemplate::Leaf(vec![4, 4, 4]).total(), 12);
    }

    #[test]
    fn test_validate_rejects_degenerate_templates() {
        assert_eq!(
            SizeTemplate::Leaf(vec![]).validate(),
            Err(TemplateError::EmptyLeaf)
        );
        assert_eq!(
            SizeTemplate::Node(vec![]).validate(),
            Err(TemplateError::EmptyNode)
        );
        assert_eq!(
            SizeTemplate::Node(vec![SizeTemplate::Leaf(vec![3, 0])]).validate(),
            Err(TemplateError::ZeroSize)
        );
        assert_eq!(
            SizeTemplate::Node(vec![SizeTemplate::Leaf(vec![3, 2])]).validate(),
            Ok(())
        );
    }

    #[test]
    fn test_untagged_toml_round_trip() {
        #[derive(Debug, serde::Deserialize)]
        struct Wrapper {
            template: SizeTemplate,
        }
        let parsed: Wrapper = toml::from_str("template = [[6, 4], [5, 5]]").unwrap();
        assert_eq!(
            parsed.template,
            SizeTemplate::Node(vec![
                SizeTemplate::Leaf(vec![6, 4]),
                SizeTemplate::Leaf(vec![5, 5]),
            ])
        );

        let leaf: Wrapper = toml::from_str("template = [4, 4, 4]").unwrap();
        assert_eq!(leaf.template, SizeTemplate::Leaf(vec![4, 4, 4]));
    }
}
