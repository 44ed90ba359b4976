// src/cube.rs
//! Кубические координаты гексагональной сетки
//!
//! Каждая клетка карты идентифицируется тройкой (x, y, z) с инвариантом
//! x + y + z = 0. Все операции (соседи, повороты, расстояния) — чистая
//! арифметика значений, без состояния.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Кубическая координата гекса. Инвариант: x + y + z == 0.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct Cube {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// Шесть единичных направлений, по часовой стрелке.
/// `rotate_right` переводит `DIRECTIONS[i]` в `DIRECTIONS[(i + 1) % 6]`.
pub const DIRECTIONS: [Cube; 6] = [
    Cube { x: 1, y: -1, z: 0 },
    Cube { x: 1, y: 0, z: -1 },
    Cube { x: 0, y: 1, z: -1 },
    Cube { x: -1, y: 1, z: 0 },
    Cube { x: -1, y: 0, z: 1 },
    Cube { x: 0, y: -1, z: 1 },
];

/// Шесть диагональных направлений на расстоянии 2.
/// `DIAGONALS[i] = DIRECTIONS[i] + DIRECTIONS[(i + 1) % 6]`; промежуточными
/// клетками «прыжка» служат именно эти два направления.
pub const DIAGONALS: [Cube; 6] = [
    Cube { x: 2, y: -1, z: -1 },
    Cube { x: 1, y: 1, z: -2 },
    Cube { x: -1, y: 2, z: -1 },
    Cube { x: -2, y: 1, z: 1 },
    Cube { x: -1, y: -1, z: 2 },
    Cube { x: 1, y: -2, z: 1 },
];

/// Морской пролив между двумя не соседними клетками суши:
/// обе промежуточные клетки — море, противоположная — суша.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strait {
    /// Клетка суши по ту сторону пролива.
    pub land: Cube,
    /// Пара морских клеток, через которые проходит пролив.
    pub sea: (Cube, Cube),
}

impl Cube {
    /// Создаёт координату, проверяя инвариант x + y + z == 0.
    ///
    /// # Panics
    /// Нарушение инварианта — ошибка программиста, не восстановимая ситуация.
    #[must_use]
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        assert!(x + y + z == 0, "malformed cube ({x}, {y}, {z})");
        Self { x, y, z }
    }

    /// Гексагональное расстояние до начала координат: max(|x|, |y|, |z|).
    #[must_use]
    pub fn magnitude(self) -> u32 {
        self.x.abs().max(self.y.abs()).max(self.z.abs()) as u32
    }

    /// Гексагональное расстояние между двумя клетками.
    #[must_use]
    pub fn dist(self, other: Cube) -> u32 {
        (self - other).magnitude()
    }

    /// Шесть соседних клеток на расстоянии 1.
    #[must_use]
    pub fn neighbors(self) -> [Cube; 6] {
        DIRECTIONS.map(|d| self + d)
    }

    /// Шесть диагональных клеток на расстоянии 2, достижимых «прыжком»
    /// через пару общих рёбер — кандидаты на морские проливы.
    #[must_use]
    pub fn strait_neighbors(self) -> [Cube; 6] {
        DIAGONALS.map(|d| self + d)
    }

    /// Поворот вокруг начала координат на 60° × n по часовой стрелке.
    /// Отрицательные n поворачивают против часовой.
    #[must_use]
    pub fn rotate_right(self, n: i32) -> Self {
        let mut c = self;
        for _ in 0..n.rem_euclid(6) {
            c = Cube {
                x: -c.y,
                y: -c.z,
                z: -c.x,
            };
        }
        c
    }

    /// Перебирает все шесть поворотов и возвращает проливы, для которых обе
    /// промежуточные клетки лежат в `sea`, а диагональная — в `land`.
    #[must_use]
    pub fn valid_straits(self, land: &BTreeSet<Cube>, sea: &BTreeSet<Cube>) -> Vec<Strait> {
        let mut straits = Vec::new();
        for r in 0..6 {
            let target = self + DIAGONALS[r];
            let mid_a = self + DIRECTIONS[r];
            let mid_b = self + DIRECTIONS[(r + 1) % 6];
            if land.contains(&target) && sea.contains(&mid_a) && sea.contains(&mid_b) {
                straits.push(Strait {
                    land: target,
                    sea: (mid_a, mid_b),
                });
            }
        }
        straits
    }
}

impl Add for Cube {
    type Output = Cube;

    fn add(self, rhs: Cube) -> Cube {
        Cube {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

impl AddAssign for Cube {
    fn add_assign(&mut self, rhs: Cube) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for Cube {
    type Output = Cube;

    fn sub(self, rhs: Cube) -> Cube {
        Cube {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

impl SubAssign for Cube {
    fn sub_assign(&mut self, rhs: Cube) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}
