// src/area.rs
//! Куски (области) карты
//!
//! `Area` — именованное множество клеток плюс производные данные о границе
//! и соседях, вычисляемые явным вызовом `calc_edges` по снимку разбиения.
//! Производные поля никогда не правятся по месту: после любого изменения
//! членства область строится заново из нового разбиения.

use crate::cube::Cube;
use crate::voronoi::Partition;
use std::collections::{BTreeMap, BTreeSet};

/// Кусок карты: идентификатор, клетки и производные данные о границе.
#[derive(Debug, Clone, Default)]
pub struct Area {
    pub id: i32,
    pub members: BTreeSet<Cube>,
    /// Клетки куска, имеющие хотя бы одного соседа вне куска.
    pub boundary: BTreeSet<Cube>,
    /// Для каждого соседнего куска — наши клетки, касающиеся его,
    /// по одной записи на каждую пару смежных клеток.
    pub self_edges: BTreeMap<i32, Vec<Cube>>,
    /// Для каждого соседнего куска — его клетки, касающиеся нас.
    /// Длина всегда совпадает с `self_edges` того же соседа.
    pub other_edges: BTreeMap<i32, Vec<Cube>>,
    /// Кусок касается края известного домена.
    pub outside: bool,
}

impl Area {
    #[must_use]
    pub fn new(id: i32, members: BTreeSet<Cube>) -> Self {
        Self {
            id,
            members,
            ..Self::default()
        }
    }

    /// Пересчитывает границу, рёбра и флаг `outside` по снимку разбиения.
    ///
    /// Предыдущее состояние рёбер полностью сбрасывается, так что вызов
    /// идемпотентен и не накапливает записи между версиями разбиения.
    pub fn calc_edges(&mut self, id_from_cube: &Partition) {
        self.boundary.clear();
        self.self_edges.clear();
        self.other_edges.clear();
        self.outside = false;

        for &member in &self.members {
            for neighbor in member.neighbors() {
                match id_from_cube.get(&neighbor) {
                    None => {
                        self.outside = true;
                        self.boundary.insert(member);
                    }
                    Some(&other_id) if other_id != self.id => {
                        self.boundary.insert(member);
                        self.self_edges.entry(other_id).or_default().push(member);
                        self.other_edges.entry(other_id).or_default().push(neighbor);
                    }
                    Some(_) => {}
                }
            }
        }
    }

    /// Длина общей границы с куском `other_id` в парах смежных клеток.
    #[must_use]
    pub fn border_len(&self, other_id: i32) -> usize {
        self.self_edges.get(&other_id).map_or(0, Vec::len)
    }

    /// Минимальное гексагональное расстояние от клеток куска до набора
    /// клеток: одиночной, списка или границы другого куска.
    pub fn min_dist<'a, I>(&self, other: I) -> Option<u32>
    where
        I: IntoIterator<Item = &'a Cube>,
    {
        let mut best: Option<u32> = None;
        for &target in other {
            for &member in &self.members {
                let d = member.dist(target);
                if best.is_none_or(|b| d < b) {
                    best = Some(d);
                }
            }
        }
        best
    }

    /// Количество потенциальных проливов до другого куска: пар граничных
    /// клеток, разделённых ровно одним диагональным «прыжком».
    #[must_use]
    pub fn count_straits(&self, other: &Area) -> usize {
        let mut count = 0;
        for &member in &self.boundary {
            for target in member.strait_neighbors() {
                if other.boundary.contains(&target) {
                    count += 1;
                }
            }
        }
        count
    }
}

/// Собирает свежие области из снимка разбиения и считает им рёбра.
///
/// Клетки с маркером `-1` (незанятые) областей не образуют.
#[must_use]
pub fn areas_from_partition(id_from_cube: &Partition) -> BTreeMap<i32, Area> {
    let mut members: BTreeMap<i32, BTreeSet<Cube>> = BTreeMap::new();
    for (&cube, &id) in id_from_cube {
        if id >= 0 {
            members.entry(id).or_default().insert(cube);
        }
    }

    let mut areas: BTreeMap<i32, Area> = members
        .into_iter()
        .map(|(id, cubes)| (id, Area::new(id, cubes)))
        .collect();
    for area in areas.values_mut() {
        area.calc_edges(id_from_cube);
    }
    areas
}
