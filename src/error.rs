// src/error.rs
//! Ошибки генерации
//!
//! Два семейства: нарушения контракта (неверные тройки координат, списки
//! размеров с неправильной суммой) валят процесс через `assert!`/`panic!`
//! и здесь не представлены; ожидаемые неудачи поиска моделируются как
//! варианты `Result` и перехватываются циклами повторных попыток.

use crate::cube::Cube;
use thiserror::Error;

/// Дефект шаблона размеров, обнаруживаемый при загрузке конфигурации.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TemplateError {
    #[error("template node has no children")]
    EmptyNode,
    #[error("template leaf has no sizes")]
    EmptyLeaf,
    #[error("template leaf contains a zero size")]
    ZeroSize,
}

/// Несогласованная конфигурация генерации.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Шаблон королевства должен быть узлом из листьев-герцогств.
    #[error("kingdom template must be a node of duchy leaves")]
    KingdomShape,

    /// Шаблон пограничного герцогства — один лист размеров графств.
    #[error("border template must be a single leaf of county sizes")]
    BorderShape,

    /// Столичному герцогству нужно хотя бы одно графство кроме столичного.
    #[error("capital duchy needs at least two counties")]
    CapitalDuchyTooSmall,

    /// Первое графство столичного герцогства фиксировано: гекс плюс кольцо.
    #[error("capital county size must be {expected}, template has {actual}")]
    CapitalCountySize { expected: usize, actual: usize },

    /// Континент из такого числа кусков не собирается.
    #[error("continent of {0} chunks is unsupported (expected 3..=5)")]
    ContinentSize(usize),

    /// Кусков меньше, чем нужно самому большому континенту.
    #[error("{num_chunks} chunks cannot host a {continent}-chunk continent")]
    TooFewChunks { num_chunks: usize, continent: usize },
}

/// Неудача случайного разбиения связного куска на подгруппы.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SplitError {
    /// Все попытки пересева исчерпаны — фигура не разрезалась.
    #[error("split did not converge after {0} attempts")]
    ExceededIterations(usize),
}

/// Рост регионов до точных квот зашёл в тупик.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GrowthError {
    /// Ни один недобравший регион не может ни расти, ни украсть клетку.
    #[error("region growth stalled before quotas were met")]
    Stalled,
}

/// Кандидат (клика макро-кусков) не даёт валидной иерархии.
///
/// Это сигнал управления, а не дефект: вызывающий цикл обязан перейти
/// к следующему кандидату или перегенерировать куски целиком.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CreationError {
    /// У тройки кусков не нашлось общего углового гекса.
    #[error("no shared corner between chunks {0}, {1} and {2}")]
    NoCorner(i32, i32, i32),

    /// Угловой гекс слишком близко к краю домена или к другому якорю.
    #[error("anchor at ({}, {}, {}) blocked by domain edge or another anchor", .0.x, .0.y, .0.z)]
    AnchorBlocked(Cube),

    /// Вокруг якоря не набралось клеток на центральное графство.
    #[error("central county near ({}, {}, {}) reached only {1} of {2} cubes", .0.x, .0.y, .0.z)]
    CenterTooSmall(Cube, usize, usize),

    /// Между двумя кусками не осталось свободной общей границы.
    #[error("no unclaimed border cubes between chunks {0} and {1}")]
    EmptyBorder(i32, i32),

    /// Пограничное герцогство не дотянулось до квоты.
    #[error("border duchy reached only {got} of {want} cubes")]
    BorderTooSmall { got: usize, want: usize },

    /// Свободных клеток меньше, чем требуют квоты оставшихся единиц.
    #[error("domain exhausted: need {need} cubes, {have} unclaimed")]
    DomainExhausted { need: usize, have: usize },

    /// `growing_voronoi` не смог выполнить квоты на этом кандидате.
    #[error(transparent)]
    Growth(#[from] GrowthError),

    /// Разбиение герцогства или королевства не сошлось.
    #[error(transparent)]
    Split(#[from] SplitError),

    /// В королевстве не нашлось пригодной столицы.
    #[error("no viable capital found in kingdom {0}")]
    NoCapital(usize),
}

/// Ошибка верхнего уровня: перебор кандидатов и перегенерация кусков
/// исчерпаны, континенты собрать не удалось.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("no valid continent layout after {rechunks} rechunks ({continents_done} continents built)")]
    CandidatesExhausted {
        rechunks: usize,
        continents_done: usize,
    },
}
