// src/continent/assemble.rs
//! Сборка континентов
//!
//! Машина состояний над одной кликой макро-кусков: якоря в углах
//! треугольников, центральные графства, пограничные герцогства, королевства
//! со столицами. Любая стадия может провалиться — тогда кандидат целиком
//! отбрасывается через `CreationError`, внешний цикл переходит к следующей
//! клике, а после исчерпания кандидатов перегенерирует куски заново.
//! Частично собранные континенты наружу не выходят.

use crate::area::Area;
use crate::config::{CAPITAL_COUNTY_SIZE, GenerationParams};
use crate::continent::chunks::{CliqueCandidate, find_cliques, generate_chunks};
use crate::continent::{Continent, County, Duchy, Kingdom};
use crate::cube::Cube;
use crate::error::{CreationError, GenerationError};
use crate::split::split_chunk;
use crate::template::SizeTemplate;
use crate::voronoi::{Weights, growing_voronoi, voronoi};
use log::{debug, info};
use rand::Rng;
use rand::seq::SliceRandom;
use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap};

/// Собирает все запрошенные континенты над общим доменом.
///
/// Кандидаты-клики пробуются в порядке убывания слабейшей границы; куски
/// собранного континента исключаются из дальнейшего перебора. Если для
/// какого-то континента кандидаты кончились, куски перегенерируются с нуля,
/// не более `max_rechunks` раз.
pub fn generate_continents<R: Rng>(
    weights: &Weights,
    params: &GenerationParams,
    rng: &mut R,
) -> Result<Vec<Continent>, GenerationError> {
    let mut best_run = 0;

    'rechunk: for rechunk in 0..params.max_rechunks {
        let areas = generate_chunks(weights, params.num_chunks, rng);
        let mut used: BTreeSet<i32> = BTreeSet::new();
        let mut continents: Vec<Continent> = Vec::new();

        for &clique_size in &params.continents {
            let mut built = false;
            for candidate in find_cliques(&areas, clique_size) {
                if candidate.chunk_ids.iter().any(|id| used.contains(id)) {
                    continue;
                }
                match create_triangular_continent(weights, &areas, &candidate, params, rng) {
                    Ok(continent) => {
                        used.extend(&continent.chunk_ids);
                        continents.push(continent);
                        built = true;
                        break;
                    }
                    Err(err) => {
                        debug!("clique {:?} rejected: {err}", candidate.chunk_ids);
                    }
                }
            }
            if !built {
                best_run = best_run.max(continents.len());
                info!(
                    "rechunk {}: {} of {} continents placed, reseeding chunks",
                    rechunk + 1,
                    continents.len(),
                    params.continents.len()
                );
                continue 'rechunk;
            }
        }

        info!(
            "{} continents assembled after {} rechunks",
            continents.len(),
            rechunk
        );
        return Ok(continents);
    }

    Err(GenerationError::CandidatesExhausted {
        rechunks: params.max_rechunks,
        continents_done: best_run,
    })
}

/// Вырезает один континент из клики кусков или отбраковывает кандидата.
pub fn create_triangular_continent<R: Rng>(
    weights: &Weights,
    areas: &BTreeMap<i32, Area>,
    candidate: &CliqueCandidate,
    params: &GenerationParams,
    rng: &mut R,
) -> Result<Continent, CreationError> {
    let ids = &candidate.chunk_ids;
    let border_size = params.border_size();
    let kingdom_size = params.kingdom_size();

    // Слабейшая граница клики обязана вмещать пограничное герцогство;
    // усечённые герцогства наружу не выпускаются.
    if candidate.min_boundary < border_size {
        return Err(CreationError::BorderTooSmall {
            got: candidate.min_boundary,
            want: border_size,
        });
    }

    // Домен континента — клетки кусков клики; соседние куски не затрагиваются.
    let mut continent_weights = Weights::new();
    for id in ids {
        for &cube in &areas[id].members {
            continent_weights.insert(cube, weights[&cube]);
        }
    }

    // Стадия 1: якоря в углах треугольников веерной триангуляции клики.
    let triangles: Vec<[i32; 3]> = ids.windows(3).map(|w| [w[0], w[1], w[2]]).collect();
    let mut allocated: BTreeSet<Cube> = BTreeSet::new();
    let mut anchors: Vec<Cube> = Vec::new();
    for &[a, b, c] in &triangles {
        let corner = triangle_corner(areas, a, b, c).ok_or(CreationError::NoCorner(a, b, c))?;
        let mut patch = vec![corner];
        patch.extend(corner.neighbors());
        if patch
            .iter()
            .any(|p| !continent_weights.contains_key(p) || allocated.contains(p))
        {
            return Err(CreationError::AnchorBlocked(corner));
        }
        allocated.extend(patch);
        anchors.push(corner);
    }

    // Стадия 2: центральное графство каждого куска треугольника — локальный
    // Вороной от ближайшей к якорю свободной клетки куска.
    let mut central_counties: Vec<County> = Vec::new();
    for (triangle, &anchor) in triangles.iter().zip(&anchors) {
        let (_, dist_from_anchor) = voronoi(&[anchor], &continent_weights);
        for &chunk in triangle {
            let seed = areas[&chunk]
                .members
                .iter()
                .filter(|cu| !allocated.contains(cu))
                .filter_map(|cu| dist_from_anchor.get(cu).map(|&d| (d, *cu)))
                .min()
                .map(|(_, cu)| cu)
                .ok_or(CreationError::CenterTooSmall(anchor, 0, params.center_size))?;

            let chunk_weights = restrict(&continent_weights, &areas[&chunk].members);
            let county = frontier_grow(&[seed], &chunk_weights, &allocated, params.center_size);
            if county.len() < params.center_size {
                return Err(CreationError::CenterTooSmall(
                    anchor,
                    county.len(),
                    params.center_size,
                ));
            }
            allocated.extend(county.iter().copied());
            central_counties.push(County::new(seed, county, pick_terrain(params, rng)));
        }
    }

    // Стадия 3 (только для клик из 4–5 кусков): фиксированные герцогства
    // между якорями, выращенные от середины общей границы до точной квоты.
    let mut fixed_borders: Vec<BTreeSet<Cube>> = Vec::new();
    let mut bordered: BTreeSet<(i32, i32)> = BTreeSet::new();
    for window in triangles.windows(2) {
        let (b, c) = (window[0][1], window[0][2]);
        let pairs: Vec<(Cube, Cube)> = border_pairs(areas, b, c)
            .into_iter()
            .filter(|(s, o)| !allocated.contains(s) && !allocated.contains(o))
            .collect();
        if pairs.is_empty() {
            return Err(CreationError::EmptyBorder(b, c));
        }
        let (s, o) = pairs[pairs.len() / 2];
        let duchy = frontier_grow(&[s, o], &continent_weights, &allocated, border_size);
        if duchy.len() < border_size {
            return Err(CreationError::BorderTooSmall {
                got: duchy.len(),
                want: border_size,
            });
        }
        allocated.extend(duchy.iter().copied());
        fixed_borders.push(duchy);
        bordered.insert((b.min(c), b.max(c)));
    }

    // Стадия 4: центры оставшихся границ и семена королевств, затем рост
    // до точных квот по всем свободным клеткам домена.
    let mut pairs_to_border: Vec<(i32, i32)> = Vec::new();
    for (i, &a) in ids.iter().enumerate() {
        for &b in &ids[i + 1..] {
            if !bordered.contains(&(a, b)) {
                pairs_to_border.push((a, b));
            }
        }
    }

    let mut taken_centers: BTreeSet<Cube> = BTreeSet::new();
    let mut border_centers: Vec<Cube> = Vec::new();
    for &(a, b) in &pairs_to_border {
        let options: Vec<Cube> = border_pairs(areas, a, b)
            .into_iter()
            .flat_map(|(s, o)| [s, o])
            .filter(|cu| !allocated.contains(cu) && !taken_centers.contains(cu))
            .collect::<BTreeSet<Cube>>()
            .into_iter()
            .collect();
        if options.is_empty() {
            return Err(CreationError::EmptyBorder(a, b));
        }
        let center = options[rng.gen_range(0..options.len())];
        taken_centers.insert(center);
        border_centers.push(center);
    }

    let claimed_sources: Vec<Cube> = allocated.iter().copied().collect();
    let (_, dist_from_claimed) = voronoi(&claimed_sources, &continent_weights);
    let mut kingdom_seeds: Vec<Cube> = Vec::new();
    for id in ids {
        let seed = areas[id]
            .members
            .iter()
            .filter(|cu| !allocated.contains(cu) && !taken_centers.contains(cu))
            .filter_map(|cu| dist_from_claimed.get(cu).map(|&d| (d, *cu)))
            .max_by(|x, y| x.0.cmp(&y.0).then(y.1.cmp(&x.1)))
            .map(|(_, cu)| cu)
            .ok_or(CreationError::DomainExhausted {
                need: kingdom_size,
                have: 0,
            })?;
        taken_centers.insert(seed);
        kingdom_seeds.push(seed);
    }

    let unclaimed_weights: Weights = continent_weights
        .iter()
        .filter(|(cu, _)| !allocated.contains(cu))
        .map(|(&cu, &w)| (cu, w))
        .collect();
    let need = border_size * border_centers.len() + kingdom_size * ids.len();
    if need > unclaimed_weights.len() {
        return Err(CreationError::DomainExhausted {
            need,
            have: unclaimed_weights.len(),
        });
    }

    let mut centers = border_centers.clone();
    centers.extend(&kingdom_seeds);
    let mut sizes = vec![border_size; border_centers.len()];
    sizes.extend(std::iter::repeat_n(kingdom_size, ids.len()));
    let grown = growing_voronoi(&centers, &sizes, &unclaimed_weights)?;

    let mut groups: Vec<BTreeSet<Cube>> = vec![BTreeSet::new(); centers.len()];
    for (&cube, &gid) in &grown {
        if gid >= 0 {
            groups[gid as usize].insert(cube);
            allocated.insert(cube);
        }
    }

    // Стадия 5: пограничные герцогства режутся на графства по шаблону.
    let border_sizes = params
        .border_template
        .leaf_sizes()
        .expect("border template validated as leaf");
    let mut border_duchies: Vec<Duchy> = Vec::new();
    for group in fixed_borders.iter().chain(&groups[..border_centers.len()]) {
        let counties = split_chunk(group, border_sizes, rng, params.split_attempts)?
            .into_iter()
            .map(|cubes| {
                let capital = *cubes.iter().next().expect("county is non-empty");
                County::new(capital, cubes, pick_terrain(params, rng))
            })
            .collect();
        border_duchies.push(Duchy { counties });
    }

    // Стадия 6: столицы королевств и разрез на герцогства.
    let mut kingdoms: Vec<Kingdom> = Vec::new();
    for (k, group) in groups[border_centers.len()..].iter().enumerate() {
        kingdoms.push(carve_kingdom(
            k,
            group,
            kingdom_seeds[k],
            &continent_weights,
            &allocated,
            params,
            rng,
        )?);
    }

    debug!(
        "continent over chunks {:?}: {} anchors, {} border duchies, {} kingdoms",
        ids,
        anchors.len(),
        border_duchies.len(),
        kingdoms.len()
    );

    Ok(Continent {
        chunk_ids: ids.clone(),
        anchors,
        central_counties,
        border_duchies,
        kingdoms,
    })
}

/// Ищет столицу королевства и режет его на герцогства и графства.
///
/// Столичный гекс: ровно пять соседей в королевстве и один в свободном
/// пространстве (он станет затравкой морского региона). Кандидаты идут от
/// дальнего к ближнему по карте расстояний от семени королевства; на каждого
/// даётся несколько попыток разреза. Разрез принимается, только если к
/// столичному графству примыкает один лишь остаток столичного герцогства:
/// он держит герцогство связным, а остальные герцогства графства не касаются.
fn carve_kingdom<R: Rng>(
    index: usize,
    group: &BTreeSet<Cube>,
    seed: Cube,
    continent_weights: &Weights,
    allocated: &BTreeSet<Cube>,
    params: &GenerationParams,
    rng: &mut R,
) -> Result<Kingdom, CreationError> {
    let duchy_templates = params
        .kingdom_template
        .children()
        .expect("kingdom template validated as node");
    let group_weights = restrict(continent_weights, group);
    let (_, dist_from_seed) = voronoi(&[seed], &group_weights);

    let mut candidates: Vec<Cube> = group
        .iter()
        .copied()
        .filter(|cu| {
            let in_group = cu.neighbors().iter().filter(|n| group.contains(n)).count();
            let free = cu
                .neighbors()
                .iter()
                .filter(|n| !allocated.contains(n))
                .count();
            in_group == 5 && free == 1
        })
        .collect();
    candidates.sort_by_key(|cu| (Reverse(dist_from_seed.get(cu).copied().unwrap_or(0)), *cu));

    let capital_sizes = duchy_templates[0]
        .leaf_sizes()
        .expect("duchy template validated as leaf");
    let mut split_sizes: Vec<usize> = vec![duchy_templates[0].total() - CAPITAL_COUNTY_SIZE];
    split_sizes.extend(duchy_templates[1..].iter().map(SizeTemplate::total));

    for capital in candidates {
        let capital_county: BTreeSet<Cube> = capital
            .neighbors()
            .into_iter()
            .filter(|n| group.contains(n))
            .chain([capital])
            .collect();
        let sea_center = capital
            .neighbors()
            .into_iter()
            .find(|n| !allocated.contains(n))
            .expect("capital candidate has a free neighbor");
        let remaining: BTreeSet<Cube> = group.difference(&capital_county).copied().collect();

        // Всё окружение графства обязан накрыть остаток столичного
        // герцогства; кандидат с более широким окружением не годится ни
        // при каком разрезе.
        let collar = remaining
            .iter()
            .filter(|cu| cu.neighbors().iter().any(|n| capital_county.contains(n)))
            .count();
        if collar > split_sizes[0] {
            continue;
        }

        'attempt: for _ in 0..params.capital_split_attempts {
            let Ok(parts) = split_chunk(&remaining, &split_sizes, rng, params.split_attempts)
            else {
                continue;
            };
            let touches = parts[0]
                .iter()
                .any(|cu| cu.neighbors().iter().any(|n| capital_county.contains(n)));
            let exclusive = parts[1..].iter().all(|part| {
                part.iter()
                    .all(|cu| cu.neighbors().iter().all(|n| !capital_county.contains(n)))
            });
            if !touches || !exclusive {
                continue;
            }

            let Ok(head) = split_chunk(&parts[0], &capital_sizes[1..], rng, params.split_attempts)
            else {
                continue;
            };
            let mut counties = vec![County::new(
                capital,
                capital_county.iter().copied(),
                pick_terrain(params, rng),
            )];
            for cubes in head {
                let cap = *cubes.iter().next().expect("county is non-empty");
                counties.push(County::new(cap, cubes, pick_terrain(params, rng)));
            }
            let mut duchies = vec![Duchy { counties }];

            for (template, cubes) in duchy_templates[1..].iter().zip(&parts[1..]) {
                let sizes = template.leaf_sizes().expect("duchy template is a leaf");
                let Ok(cparts) = split_chunk(cubes, sizes, rng, params.split_attempts) else {
                    continue 'attempt;
                };
                let counties = cparts
                    .into_iter()
                    .map(|cc| {
                        let cap = *cc.iter().next().expect("county is non-empty");
                        County::new(cap, cc, pick_terrain(params, rng))
                    })
                    .collect();
                duchies.push(Duchy { counties });
            }

            return Ok(Kingdom {
                duchies,
                capital,
                sea_center,
            });
        }
    }

    Err(CreationError::NoCapital(index))
}

/// Угловой гекс треугольника кусков: клетка одного куска, касающаяся двух
/// остальных. Перебираются все три владельца, берётся младшая по порядку.
fn triangle_corner(areas: &BTreeMap<i32, Area>, a: i32, b: i32, c: i32) -> Option<Cube> {
    for (owner, left, right) in [(a, b, c), (b, a, c), (c, a, b)] {
        let area = &areas[&owner];
        let (Some(lhs), Some(rhs)) = (area.self_edges.get(&left), area.self_edges.get(&right))
        else {
            continue;
        };
        let lhs: BTreeSet<Cube> = lhs.iter().copied().collect();
        if let Some(corner) = rhs.iter().copied().filter(|cu| lhs.contains(cu)).min() {
            return Some(corner);
        }
    }
    None
}

/// Пары смежных клеток через границу кусков `b` и `c`: своя клетка + чужая,
/// параллельные списки `self_edges`/`other_edges` идут в одном порядке.
fn border_pairs(areas: &BTreeMap<i32, Area>, b: i32, c: i32) -> Vec<(Cube, Cube)> {
    let area = &areas[&b];
    match (area.self_edges.get(&c), area.other_edges.get(&c)) {
        (Some(own), Some(theirs)) => own.iter().copied().zip(theirs.iter().copied()).collect(),
        _ => Vec::new(),
    }
}

/// Рост от семян по дешевейшему фронтиру до `want` клеток. Порядок захвата
/// повторяет порядок осаждения Дейкстры, поэтому результат связен; если
/// свободных клеток не хватило, возвращается меньше запрошенного.
fn frontier_grow(
    seeds: &[Cube],
    weights: &Weights,
    claimed: &BTreeSet<Cube>,
    want: usize,
) -> BTreeSet<Cube> {
    let mut dist: BTreeMap<Cube, u64> = seeds.iter().map(|&s| (s, 0)).collect();
    let mut heap: BinaryHeap<Reverse<(u64, Cube)>> =
        seeds.iter().map(|&s| Reverse((0, s))).collect();
    let mut taken: BTreeSet<Cube> = BTreeSet::new();

    while let Some(Reverse((d, cube))) = heap.pop() {
        if taken.contains(&cube) || dist.get(&cube) != Some(&d) {
            continue;
        }
        taken.insert(cube);
        if taken.len() == want {
            break;
        }
        for neighbor in cube.neighbors() {
            let Some(&w) = weights.get(&neighbor) else {
                continue;
            };
            if claimed.contains(&neighbor) || taken.contains(&neighbor) {
                continue;
            }
            let nd = d + u64::from(w);
            if dist.get(&neighbor).is_none_or(|&old| nd < old) {
                dist.insert(neighbor, nd);
                heap.push(Reverse((nd, neighbor)));
            }
        }
    }
    taken
}

fn restrict(weights: &Weights, cubes: &BTreeSet<Cube>) -> Weights {
    cubes
        .iter()
        .filter_map(|cu| weights.get(cu).map(|&w| (*cu, w)))
        .collect()
}

fn pick_terrain<R: Rng>(params: &GenerationParams, rng: &mut R) -> String {
    params
        .terrain_templates
        .choose(rng)
        .cloned()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::area::areas_from_partition;
    use crate::voronoi::Partition;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn disc(radius: i32) -> Weights {
        let mut weights = Weights::new();
        for x in -radius..=radius {
            for y in (-radius).max(-x - radius)..=radius.min(-x + radius) {
                weights.insert(Cube::new(x, y, -x - y), 1);
            }
        }
        weights
    }

    fn is_contiguous(group: &[Cube]) -> bool {
        let set: BTreeSet<Cube> = group.iter().copied().collect();
        let Some(&start) = set.iter().next() else {
            return true;
        };
        let mut seen = BTreeSet::from([start]);
        let mut stack = vec![start];
        while let Some(cube) = stack.pop() {
            for n in cube.neighbors() {
                if set.contains(&n) && seen.insert(n) {
                    stack.push(n);
                }
            }
        }
        seen.len() == set.len()
    }

    fn test_params() -> GenerationParams {
        GenerationParams {
            seed: 0,
            num_chunks: 20,
            continents: vec![3],
            center_size: 4,
            border_template: SizeTemplate::Leaf(vec![3, 3]),
            kingdom_template: SizeTemplate::Node(vec![
                SizeTemplate::Leaf(vec![6, 6, 5]),
                SizeTemplate::Leaf(vec![3]),
            ]),
            split_attempts: 1000,
            capital_split_attempts: 30,
            max_rechunks: 100,
            ..GenerationParams::default()
        }
    }

    #[test]
    fn test_full_assembly_on_uniform_disc() {
        let weights = disc(18);
        let params = test_params();
        params.validate().unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(params.seed);

        let continents = generate_continents(&weights, &params, &mut rng).unwrap();
        assert_eq!(continents.len(), 1);
        let continent = &continents[0];

        assert_eq!(continent.chunk_ids.len(), 3);
        assert_eq!(continent.anchors.len(), 1);
        assert_eq!(continent.central_counties.len(), 3);
        assert_eq!(continent.border_duchies.len(), 3);
        assert_eq!(continent.kingdoms.len(), 3);

        // Квоты размеров выполняются точно на каждом уровне.
        for county in &continent.central_counties {
            assert_eq!(county.size(), params.center_size);
        }
        for duchy in &continent.border_duchies {
            let sizes: Vec<usize> = duchy.counties.iter().map(County::size).collect();
            assert_eq!(sizes, vec![3, 3]);
        }
        for kingdom in &continent.kingdoms {
            let sizes: Vec<Vec<usize>> = kingdom
                .duchies
                .iter()
                .map(|d| d.counties.iter().map(County::size).collect())
                .collect();
            assert_eq!(sizes, vec![vec![6, 6, 5], vec![3]]);
            assert_eq!(kingdom.duchies[0].counties[0].capital, kingdom.capital);

            // Столичное графство эксклюзивно: касаться его может только
            // столичное герцогство.
            let capital_county: BTreeSet<Cube> =
                kingdom.duchies[0].counties[0].cubes.iter().copied().collect();
            for duchy in &kingdom.duchies[1..] {
                for county in &duchy.counties {
                    for &cube in &county.cubes {
                        assert!(
                            cube.neighbors().iter().all(|n| !capital_county.contains(n)),
                            "non-capital duchy touches the capital county"
                        );
                    }
                }
            }
        }

        // Каждой клетке ровно один владелец; суммарный размер сходится.
        assert_eq!(continent.total_cubes(), 3 * 4 + 3 * 6 + 3 * 20);
        let mut all_cubes: BTreeSet<Cube> = BTreeSet::new();
        for county in continent.central_counties.iter().chain(
            continent
                .kingdoms
                .iter()
                .flat_map(|k| &k.duchies)
                .chain(&continent.border_duchies)
                .flat_map(|d| &d.counties),
        ) {
            for &cube in &county.cubes {
                assert!(all_cubes.insert(cube), "cube claimed twice");
            }
            assert!(is_contiguous(&county.cubes), "county is not contiguous");
        }

        // Нумерация провинций: столицы уникальны, списки параллельны.
        let pids = continent.cube_from_pid();
        let tags = continent.terr_templates();
        assert_eq!(pids.len(), 3 + 3 * 2 + 3 * 4);
        assert_eq!(pids.len(), tags.len());
        let capitals: BTreeSet<Cube> = pids.iter().copied().collect();
        assert_eq!(capitals.len(), pids.len());
        assert!(tags.iter().all(|t| params.terrain_templates.contains(t)));

        // Морские затравки не входят в континент.
        let sea = continent.sea_centers();
        assert_eq!(sea.len(), 3);
        assert!(sea.iter().all(|c| !all_cubes.contains(c)));
    }

    #[test]
    fn test_carve_kingdom_isolates_capital_county() {
        // Группа-«головастик»: столичное графство из шести клеток и хвост
        // из шести. Принять можно только разрез, где ближняя половина
        // хвоста уходит остатку столичного герцогства, а дальняя — второму
        // герцогству, не касаясь графства.
        let capital = Cube::new(0, 0, 0);
        let sea = Cube::new(1, -1, 0);
        let mut group: BTreeSet<Cube> = capital
            .neighbors()
            .into_iter()
            .filter(|&n| n != sea)
            .collect();
        group.insert(capital);
        let tail: Vec<Cube> = (2..8).map(|i| Cube::new(0, -i, i)).collect();
        group.extend(&tail);

        let weights: Weights = group.iter().map(|&c| (c, 1)).collect();
        let params = GenerationParams {
            kingdom_template: SizeTemplate::Node(vec![
                SizeTemplate::Leaf(vec![6, 3]),
                SizeTemplate::Leaf(vec![3]),
            ]),
            capital_split_attempts: 50,
            ..GenerationParams::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(2);

        let kingdom =
            carve_kingdom(0, &group, tail[5], &weights, &group, &params, &mut rng).unwrap();
        assert_eq!(kingdom.capital, capital);
        assert_eq!(kingdom.sea_center, sea);
        assert_eq!(kingdom.duchies.len(), 2);

        let capital_county: BTreeSet<Cube> =
            kingdom.duchies[0].counties[0].cubes.iter().copied().collect();
        assert_eq!(capital_county.len(), 6);
        assert!(capital_county.contains(&capital));
        assert_eq!(kingdom.duchies[0].counties[1].cubes.len(), 3);

        // Второе герцогство — дальняя половина хвоста, графства не касается.
        for county in &kingdom.duchies[1].counties {
            for &cube in &county.cubes {
                assert!(cube.neighbors().iter().all(|n| !capital_county.contains(n)));
            }
        }
    }

    #[test]
    fn test_thin_boundary_is_rejected_not_truncated() {
        // Три внутренних сектора диска радиуса 3: границы в несколько пар
        // клеток, заведомо тоньше квоты пограничного герцогства.
        let weights = disc(3);
        let mut partition = Partition::new();
        for &cube in weights.keys() {
            let id = if cube.magnitude() == 3 {
                9
            } else if cube.x > 0 && cube.y < 0 && cube.z >= 0 {
                0
            } else if cube.z < 0 {
                1
            } else {
                2
            };
            partition.insert(cube, id);
        }
        let areas = areas_from_partition(&partition);
        let candidate = find_cliques(&areas, 3).remove(0);

        let params = GenerationParams::default();
        assert!(candidate.min_boundary < params.border_size());

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let result = create_triangular_continent(&weights, &areas, &candidate, &params, &mut rng);
        assert!(matches!(
            result,
            Err(CreationError::BorderTooSmall { .. })
        ));
    }
}
