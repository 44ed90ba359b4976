// src/config.rs
//! Конфигурация генерации территорий
//!
//! Этот модуль определяет параметры, управляющие нарезкой мира:
//! - Количество макро-кусков и состав континентов
//! - Шаблоны размеров графств, герцогств и королевств
//! - Бюджеты повторных попыток для случайных алгоритмов
//! - Список тегов шаблонов местности для графств
//!
//! Все структуры поддерживают сериализацию в TOML/JSON для удобной настройки
//! через конфигурационные файлы. Шаблоны размеров валидируются один раз при
//! загрузке (`validate`), а не при каждой рекурсии.

use crate::error::ConfigError;
use crate::template::SizeTemplate;
use serde::{Deserialize, Serialize};
use std::fs;

/// Размер столичного графства: гекс столицы плюс пять соседей по королевству.
pub const CAPITAL_COUNTY_SIZE: usize = 6;

/// Основные параметры генерации территорий
///
/// Полная конфигурация одного запуска. Поддерживает загрузку из TOML-файлов.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Сид генератора случайных чисел (детерминированная генерация)
    pub seed: u64,

    /// Количество макро-кусков, на которые режется домен перед поиском клик
    #[serde(default = "default_num_chunks")]
    pub num_chunks: usize,

    /// Континенты к сборке: число кусков в клике каждого (3, 4 или 5)
    #[serde(default = "default_continents")]
    pub continents: Vec<usize>,

    /// Размер центрального графства вокруг якоря, в клетках
    #[serde(default = "default_center_size")]
    pub center_size: usize,

    /// Шаблон графств пограничного герцогства; его сумма — квота границы
    #[serde(default = "default_border_template")]
    pub border_template: SizeTemplate,

    /// Шаблон королевства: лист на каждое герцогство, первый — столичный
    #[serde(default = "default_kingdom_template")]
    pub kingdom_template: SizeTemplate,

    /// Бюджет пересевов одного случайного разбиения
    #[serde(default = "default_split_attempts")]
    pub split_attempts: usize,

    /// Число попыток разрезать королевство вокруг одного кандидата в столицы
    #[serde(default = "default_capital_split_attempts")]
    pub capital_split_attempts: usize,

    /// Сколько раз можно перегенерировать куски с нуля, прежде чем сдаться
    #[serde(default = "default_max_rechunks")]
    pub max_rechunks: usize,

    /// Теги шаблонов местности, раздаваемые графствам
    #[serde(default = "default_terrain_templates")]
    pub terrain_templates: Vec<String>,
}

fn default_num_chunks() -> usize {
    24
}
fn default_continents() -> Vec<usize> {
    vec![3]
}
fn default_center_size() -> usize {
    5
}
fn default_border_template() -> SizeTemplate {
    SizeTemplate::Leaf(vec![4, 4, 4])
}
fn default_kingdom_template() -> SizeTemplate {
    SizeTemplate::Node(vec![
        SizeTemplate::Leaf(vec![6, 5, 5]),
        SizeTemplate::Leaf(vec![5, 4]),
        SizeTemplate::Leaf(vec![5, 4]),
    ])
}
fn default_split_attempts() -> usize {
    1000
}
fn default_capital_split_attempts() -> usize {
    5
}
fn default_max_rechunks() -> usize {
    10
}
fn default_terrain_templates() -> Vec<String> {
    ["plains", "hills", "forest", "farmlands", "mountains"]
        .map(str::to_owned)
        .to_vec()
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            seed: 0,
            num_chunks: default_num_chunks(),
            continents: default_continents(),
            center_size: default_center_size(),
            border_template: default_border_template(),
            kingdom_template: default_kingdom_template(),
            split_attempts: default_split_attempts(),
            capital_split_attempts: default_capital_split_attempts(),
            max_rechunks: default_max_rechunks(),
            terrain_templates: default_terrain_templates(),
        }
    }
}

impl GenerationParams {
    /// Квота пограничного герцогства в клетках.
    #[must_use]
    pub fn border_size(&self) -> usize {
        self.border_template.total()
    }

    /// Квота королевства в клетках (включая столичное графство).
    #[must_use]
    pub fn kingdom_size(&self) -> usize {
        self.kingdom_template.total()
    }

    /// Загружает параметры из TOML-файла и валидирует их.
    ///
    /// # Ошибки
    /// Возвращает ошибку, если файл не найден, формат недопустим или
    /// шаблоны размеров несогласованны.
    ///
    /// # Пример
    /// ```toml
    /// # realms.toml
    /// seed = 42
    /// num_chunks = 24
    /// continents = [3, 3]
    /// border_template = [4, 4, 4]
    /// kingdom_template = [[6, 5, 5], [5, 4], [5, 4]]
    /// ```
    pub fn from_toml_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        let params: Self = toml::from_str(&contents)?;
        params.validate()?;
        Ok(params)
    }

    /// Проверяет согласованность шаблонов один раз, до начала генерации.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.border_template.validate()?;
        self.kingdom_template.validate()?;

        if self.border_template.leaf_sizes().is_none() {
            return Err(ConfigError::BorderShape);
        }
        let Some(duchies) = self.kingdom_template.children() else {
            return Err(ConfigError::KingdomShape);
        };
        let Some(capital_duchy) = duchies.first().and_then(SizeTemplate::leaf_sizes) else {
            return Err(ConfigError::KingdomShape);
        };
        if duchies.iter().any(|d| d.leaf_sizes().is_none()) {
            return Err(ConfigError::KingdomShape);
        }
        if capital_duchy[0] != CAPITAL_COUNTY_SIZE {
            return Err(ConfigError::CapitalCountySize {
                expected: CAPITAL_COUNTY_SIZE,
                actual: capital_duchy[0],
            });
        }
        if capital_duchy.len() < 2 {
            return Err(ConfigError::CapitalDuchyTooSmall);
        }

        for &size in &self.continents {
            if !(3..=5).contains(&size) {
                return Err(ConfigError::ContinentSize(size));
            }
            if self.num_chunks < size {
                return Err(ConfigError::TooFewChunks {
                    num_chunks: self.num_chunks,
                    continent: size,
                });
            }
        }
        Ok(())
    }
}
