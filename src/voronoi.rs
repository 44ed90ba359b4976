// src/voronoi.rs
//! Взвешенные разбиения Вороного
//!
//! Семейство разбиений по взвешенному кратчайшему пути: стоимость пути —
//! сумма весов входимых клеток, сама исходная клетка стоит 0. Контейнеры
//! `BTreeMap`/`BTreeSet` и куча с ключом (стоимость, клетка, номер)
//! делают разрешение ничьих детерминированным: при равной стоимости
//! побеждает лексикографически меньшая клетка.

use crate::area::Area;
use crate::cube::Cube;
use crate::error::GrowthError;
use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap, VecDeque};

/// Взвешенный домен: ключи задают принадлежность, значения — стоимость
/// входа в клетку. Домен не обязан быть связным.
pub type Weights = BTreeMap<Cube, u32>;

/// Разбиение: клетка → номер единицы. Значение `-1` — маркер незанятой
/// клетки, валидным номером не является.
pub type Partition = BTreeMap<Cube, i32>;

/// Разбиение Вороного от нескольких источников.
///
/// Каждая достижимая клетка домена получает номер ближайшего источника;
/// недостижимые клетки отсутствуют в обеих картах (вызывающий обязан
/// сверять размеры, а не молча терять клетки).
///
/// # Panics
/// Источник вне домена — нарушение контракта.
#[must_use]
pub fn voronoi(centers: &[Cube], weights: &Weights) -> (Partition, BTreeMap<Cube, u64>) {
    let mut id_from_cube = Partition::new();
    let mut dist_from_cube: BTreeMap<Cube, u64> = BTreeMap::new();
    let mut heap: BinaryHeap<Reverse<(u64, Cube, i32)>> = BinaryHeap::new();

    for (i, &center) in centers.iter().enumerate() {
        assert!(
            weights.contains_key(&center),
            "voronoi center outside domain"
        );
        dist_from_cube.insert(center, 0);
        id_from_cube.insert(center, i as i32);
        heap.push(Reverse((0, center, i as i32)));
    }

    while let Some(Reverse((d, cube, id))) = heap.pop() {
        // Устаревшая запись: клетку уже перехватил более дешёвый путь.
        if dist_from_cube.get(&cube) != Some(&d) || id_from_cube.get(&cube) != Some(&id) {
            continue;
        }
        for neighbor in cube.neighbors() {
            let Some(&w) = weights.get(&neighbor) else {
                continue;
            };
            let nd = d + u64::from(w);
            if dist_from_cube.get(&neighbor).is_none_or(|&old| nd < old) {
                dist_from_cube.insert(neighbor, nd);
                id_from_cube.insert(neighbor, id);
                heap.push(Reverse((nd, neighbor, id)));
            }
        }
    }

    (id_from_cube, dist_from_cube)
}

/// Вороной с ограничением радиуса: пока какая-то клетка дальше `max_dist`
/// от ближайшего источника, самая дальняя достижимая клетка сама становится
/// новым источником. Используется для рассева морских зон.
#[must_use]
pub fn max_voronoi(
    poss_centers: &[Cube],
    weights: &Weights,
    max_dist: u64,
) -> (Vec<Cube>, Partition, BTreeMap<Cube, u64>) {
    assert!(!poss_centers.is_empty(), "max_voronoi needs a seed center");
    let mut centers = poss_centers.to_vec();
    loop {
        let (id_from_cube, dist_from_cube) = voronoi(&centers, weights);
        let mut farthest: Option<(u64, Cube)> = None;
        for (&cube, &d) in &dist_from_cube {
            if farthest.is_none_or(|(best, _)| d > best) {
                farthest = Some((d, cube));
            }
        }
        match farthest {
            Some((d, cube)) if d > max_dist => centers.push(cube),
            _ => return (centers, id_from_cube, dist_from_cube),
        }
    }
}

/// Вороной над графом областей: узлы — макро-куски, стоимость ребра —
/// `1 + 1 / длина общей границы`, так что плотно склеенные куски ближе.
/// Возвращает для каждой области номер ближайшего центра из `center_ids`.
#[must_use]
pub fn area_voronoi(areas: &BTreeMap<i32, Area>, center_ids: &[i32]) -> BTreeMap<i32, i32> {
    let mut dist: BTreeMap<i32, f64> = BTreeMap::new();
    let mut group: BTreeMap<i32, i32> = BTreeMap::new();
    let mut queue: VecDeque<i32> = VecDeque::new();

    for (gi, &aid) in center_ids.iter().enumerate() {
        assert!(areas.contains_key(&aid), "area_voronoi center unknown");
        dist.insert(aid, 0.0);
        group.insert(aid, gi as i32);
        queue.push_back(aid);
    }

    // Коррекция меток: перевзвешиваем до тех пор, пока есть улучшения.
    while let Some(aid) = queue.pop_front() {
        let base = dist[&aid];
        let own_group = group[&aid];
        for (&other, edges) in &areas[&aid].self_edges {
            if !areas.contains_key(&other) {
                continue;
            }
            let nd = base + 1.0 + 1.0 / edges.len() as f64;
            if dist.get(&other).is_none_or(|&old| nd < old) {
                dist.insert(other, nd);
                group.insert(other, own_group);
                queue.push_back(other);
            }
        }
    }

    group
}

/// Вороной с точными квотами: жадный рост до целевых размеров, затем
/// ремонт перехватом клеток, пока каждая единица не наберёт ровно своё.
///
/// В возвращаемом разбиении незанятые клетки домена помечены `-1`.
/// Успех гарантирует точное совпадение всех размеров и связность каждой
/// территории: рост и ремонт присоединяют только смежные клетки, а перехват
/// не разрывает жертву. Тупик поиска — `Err(GrowthError::Stalled)`,
/// перехватываемый сборкой континента.
///
/// # Panics
/// Статические нарушения контракта: несовпадение длин списков, повторные
/// или внедоменные центры, сумма квот больше домена.
pub fn growing_voronoi(
    centers: &[Cube],
    sizes: &[usize],
    weights: &Weights,
) -> Result<Partition, GrowthError> {
    assert_eq!(centers.len(), sizes.len(), "one target size per center");
    assert!(
        sizes.iter().sum::<usize>() <= weights.len(),
        "target sizes exceed domain"
    );
    assert!(sizes.iter().all(|&s| s >= 1), "zero-sized target");
    assert_eq!(
        centers.iter().collect::<BTreeSet<_>>().len(),
        centers.len(),
        "duplicate centers"
    );

    let mut owner: Partition = weights.keys().map(|&c| (c, -1)).collect();
    let mut territory: Vec<BTreeSet<Cube>> = vec![BTreeSet::new(); centers.len()];
    let mut counts: Vec<usize> = vec![1; centers.len()];
    // Фронтир каждого источника: стоимость захвата соседних свободных клеток.
    let mut frontier: Vec<BTreeMap<Cube, u64>> = vec![BTreeMap::new(); centers.len()];
    let mut heap: BinaryHeap<Reverse<(u64, usize, Cube)>> = BinaryHeap::new();

    for (i, &center) in centers.iter().enumerate() {
        assert!(
            weights.contains_key(&center),
            "growing_voronoi center outside domain"
        );
        owner.insert(center, i as i32);
        territory[i].insert(center);
    }

    let push_frontier = |i: usize,
                         from_cost: u64,
                         cube: Cube,
                         owner: &Partition,
                         frontier: &mut Vec<BTreeMap<Cube, u64>>,
                         heap: &mut BinaryHeap<Reverse<(u64, usize, Cube)>>,
                         weights: &Weights| {
        for neighbor in cube.neighbors() {
            let Some(&w) = weights.get(&neighbor) else {
                continue;
            };
            if owner[&neighbor] != -1 {
                continue;
            }
            let cost = from_cost + u64::from(w);
            if frontier[i].get(&neighbor).is_none_or(|&old| cost < old) {
                frontier[i].insert(neighbor, cost);
                heap.push(Reverse((cost, i, neighbor)));
            }
        }
    };

    for (i, &center) in centers.iter().enumerate() {
        push_frontier(i, 0, center, &owner, &mut frontier, &mut heap, weights);
    }

    // Фаза 1: жадный рост — глобально дешевейшая пара (источник, клетка)
    // среди источников, не добравших квоту.
    while let Some(Reverse((cost, i, cube))) = heap.pop() {
        if counts[i] >= sizes[i]
            || owner[&cube] != -1
            || frontier[i].get(&cube) != Some(&cost)
        {
            continue;
        }
        owner.insert(cube, i as i32);
        territory[i].insert(cube);
        counts[i] += 1;
        push_frontier(i, cost, cube, &owner, &mut frontier, &mut heap, weights);
    }

    // Фаза 2: ремонт. Свободные клетки рядом с территорией — «лёгкие»
    // варианты; недобравший источник с наименьшим их числом ходит первым.
    let easy_options = |i: usize, owner: &Partition, territory: &[BTreeSet<Cube>]| {
        let mut options: BTreeSet<Cube> = BTreeSet::new();
        for &member in &territory[i] {
            for neighbor in member.neighbors() {
                if owner.get(&neighbor) == Some(&-1) {
                    options.insert(neighbor);
                }
            }
        }
        options
    };

    let mut guard = 0usize;
    loop {
        let under: Vec<usize> = (0..centers.len()).filter(|&i| counts[i] < sizes[i]).collect();
        if under.is_empty() {
            break;
        }
        guard += 1;
        if guard > weights.len() * 16 {
            return Err(GrowthError::Stalled);
        }

        let picked = under
            .iter()
            .copied()
            .min_by_key(|&i| (easy_options(i, &owner, &territory).len(), i))
            .expect("under list is non-empty");
        let options = easy_options(picked, &owner, &territory);

        if let Some(&cube) = options.iter().next() {
            owner.insert(cube, picked as i32);
            territory[picked].insert(cube);
            counts[picked] += 1;
            continue;
        }

        // Лёгких вариантов нет: перехватываем клетку у соседа, который
        // сможет восполнить потерю собственным лёгким вариантом. Клетка,
        // без которой территория жертвы распадается, не отбирается.
        let mut stolen = None;
        'steal: for &member in &territory[picked] {
            for neighbor in member.neighbors() {
                let Some(&other) = owner.get(&neighbor) else {
                    continue;
                };
                if other < 0 || other as usize == picked {
                    continue;
                }
                let j = other as usize;
                if (counts[j] > sizes[j] || !easy_options(j, &owner, &territory).is_empty())
                    && survives_loss(&territory[j], neighbor)
                {
                    stolen = Some((neighbor, j));
                    break 'steal;
                }
            }
        }
        let Some((cube, victim)) = stolen else {
            return Err(GrowthError::Stalled);
        };
        owner.insert(cube, picked as i32);
        territory[victim].remove(&cube);
        territory[picked].insert(cube);
        counts[victim] -= 1;
        counts[picked] += 1;
    }

    debug_assert!(counts.iter().zip(sizes).all(|(c, s)| c == s));
    Ok(owner)
}

/// Остаётся ли территория связной после изъятия одной клетки.
fn survives_loss(territory: &BTreeSet<Cube>, cube: Cube) -> bool {
    let rest: BTreeSet<Cube> = territory.iter().copied().filter(|&c| c != cube).collect();
    let Some(&start) = rest.iter().next() else {
        return true;
    };
    let mut seen = BTreeSet::from([start]);
    let mut stack = vec![start];
    while let Some(c) = stack.pop() {
        for n in c.neighbors() {
            if rest.contains(&n) && seen.insert(n) {
                stack.push(n);
            }
        }
    }
    seen.len() == rest.len()
}
