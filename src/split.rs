// src/split.rs
//! Случайное разрезание связного куска
//!
//! Детерминированные порядки роста на гексагональной сетке часто оставляют
//! неразрезаемые остатки, поэтому кусок режется случайным ростом с пересевом:
//! k случайных семян, поочерёдный рост самой отстающей группы, полный сброс
//! попытки при затыке. Количество пересевов ограничено сверху.

use crate::cube::Cube;
use crate::error::SplitError;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::{BTreeMap, BTreeSet};

/// Режет связный кусок на группы заданных размеров, каждая группа связна.
///
/// Одна попытка: k различных случайных семян, затем рост наименее
/// заполненной группы случайной свободной клеткой, смежной с группой.
/// Группа без кандидатов проваливает попытку целиком — частичные результаты
/// не фиксируются. Исчерпание `max_attempts` пересевов возвращает
/// [`SplitError::ExceededIterations`].
///
/// # Panics
/// `sum(sizes) != chunk.len()` — нарушение контракта, не повторяемая ошибка.
pub fn split_chunk<R: Rng>(
    chunk: &BTreeSet<Cube>,
    sizes: &[usize],
    rng: &mut R,
    max_attempts: usize,
) -> Result<Vec<BTreeSet<Cube>>, SplitError> {
    assert_eq!(
        sizes.iter().sum::<usize>(),
        chunk.len(),
        "split sizes must sum to chunk size"
    );
    assert!(sizes.iter().all(|&s| s >= 1), "zero-sized split group");

    let members: Vec<Cube> = chunk.iter().copied().collect();
    // Соседи внутри куска считаются один раз на все попытки.
    let neighbors: BTreeMap<Cube, Vec<Cube>> = members
        .iter()
        .map(|&c| {
            let inside: Vec<Cube> = c
                .neighbors()
                .into_iter()
                .filter(|n| chunk.contains(n))
                .collect();
            (c, inside)
        })
        .collect();

    let max_steps = sizes.iter().copied().max().unwrap_or(0) * sizes.len();

    'attempts: for _ in 0..max_attempts {
        let seeds: Vec<Cube> = members
            .choose_multiple(rng, sizes.len())
            .copied()
            .collect();
        let mut groups: Vec<BTreeSet<Cube>> =
            seeds.iter().map(|&s| BTreeSet::from([s])).collect();
        let mut used: BTreeSet<Cube> = seeds.iter().copied().collect();

        let mut steps = 0;
        loop {
            // Самая отстающая группа по доле заполнения квоты.
            let Some(gi) = (0..groups.len())
                .filter(|&i| groups[i].len() < sizes[i])
                .min_by(|&a, &b| {
                    (groups[a].len() * sizes[b]).cmp(&(groups[b].len() * sizes[a]))
                })
            else {
                break;
            };

            let candidates: Vec<Cube> = groups[gi]
                .iter()
                .flat_map(|c| neighbors[c].iter().copied())
                .filter(|c| !used.contains(c))
                .collect::<BTreeSet<Cube>>()
                .into_iter()
                .collect();
            if candidates.is_empty() {
                continue 'attempts;
            }

            let cube = candidates[rng.gen_range(0..candidates.len())];
            groups[gi].insert(cube);
            used.insert(cube);

            steps += 1;
            if steps > max_steps {
                continue 'attempts;
            }
        }

        debug_assert!(groups.iter().zip(sizes).all(|(g, &s)| g.len() == s));
        return Ok(groups);
    }

    Err(SplitError::ExceededIterations(max_attempts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::DIRECTIONS;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Гексагональный «плюс» из 13 клеток: центр и шесть лучей по две клетки.
    fn plus_shape() -> BTreeSet<Cube> {
        let center = Cube::default();
        let mut shape = BTreeSet::from([center]);
        for dir in DIRECTIONS {
            let mut c = center;
            for _ in 0..2 {
                c += dir;
                shape.insert(c);
            }
        }
        shape
    }

    fn is_contiguous(group: &BTreeSet<Cube>) -> bool {
        let Some(&start) = group.iter().next() else {
            return true;
        };
        let mut seen = BTreeSet::from([start]);
        let mut stack = vec![start];
        while let Some(cube) = stack.pop() {
            for n in cube.neighbors() {
                if group.contains(&n) && seen.insert(n) {
                    stack.push(n);
                }
            }
        }
        seen.len() == group.len()
    }

    #[test]
    fn test_split_plus_shape_4_4_5() {
        let shape = plus_shape();
        assert_eq!(shape.len(), 13);
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let groups = split_chunk(&shape, &[4, 4, 5], &mut rng, 1000).unwrap();
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].len(), 4);
        assert_eq!(groups[1].len(), 4);
        assert_eq!(groups[2].len(), 5);

        // Группы разбивают вход точно и без пересечений.
        let mut union = BTreeSet::new();
        for group in &groups {
            for &cube in group {
                assert!(union.insert(cube), "cube assigned twice");
            }
            assert!(is_contiguous(group));
        }
        assert_eq!(union, shape);
    }

    #[test]
    #[should_panic(expected = "split sizes must sum to chunk size")]
    fn test_size_mismatch_is_contract_violation() {
        let shape = plus_shape();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let _ = split_chunk(&shape, &[4, 4], &mut rng, 1000);
    }

    #[test]
    fn test_unsplittable_shape_exceeds_iterations() {
        // Трёхлучевая звезда: любой разрез [2, 2] оставляет несвязный кусок.
        let center = Cube::default();
        let star: BTreeSet<Cube> = [
            center,
            center + DIRECTIONS[0],
            center + DIRECTIONS[2],
            center + DIRECTIONS[4],
        ]
        .into_iter()
        .collect();

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let result = split_chunk(&star, &[2, 2], &mut rng, 50);
        assert_eq!(result, Err(SplitError::ExceededIterations(50)));
    }

    #[test]
    fn test_single_group_returns_whole_chunk() {
        let shape = plus_shape();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let groups = split_chunk(&shape, &[13], &mut rng, 10).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0], shape);
    }
}
