// src/continent/chunks.rs
//! Макро-куски и поиск клик
//!
//! Домен режется обычным Вороным на n кусков от случайных затравок; куски,
//! касающиеся края домена, якорями быть не могут. По графу смежности кусков
//! перечисляются клики из 3–5 вершин, ранжированные по минимальной длине
//! общей границы: чем толще самая тонкая граница, тем надёжнее кандидат.

use crate::area::{Area, areas_from_partition};
use crate::cube::Cube;
use crate::voronoi::{Weights, voronoi};
use petgraph::graph::{NodeIndex, UnGraph};
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::BTreeMap;

/// Кандидат на континент: клика кусков с её слабейшей границей и размером.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliqueCandidate {
    /// Куски клики, по возрастанию идентификатора.
    pub chunk_ids: Vec<i32>,
    /// Минимальная длина общей границы среди всех пар клики.
    pub min_boundary: usize,
    /// Суммарное число клеток во всех кусках клики.
    pub total_size: usize,
}

/// Режет домен на `n` макро-кусков Вороным от случайных затравок
/// и возвращает области с уже посчитанными рёбрами.
pub fn generate_chunks<R: Rng>(weights: &Weights, n: usize, rng: &mut R) -> BTreeMap<i32, Area> {
    let members: Vec<Cube> = weights.keys().copied().collect();
    assert!(n >= 1 && n <= members.len(), "chunk count out of range");

    let seeds: Vec<Cube> = members.choose_multiple(rng, n).copied().collect();
    let (id_from_cube, _) = voronoi(&seeds, weights);
    areas_from_partition(&id_from_cube)
}

/// Граф смежности кусков: вершины — куски, не касающиеся края домена,
/// вес ребра — длина общей границы в парах клеток.
#[must_use]
pub fn adjacency_graph(areas: &BTreeMap<i32, Area>) -> UnGraph<i32, usize> {
    let mut graph = UnGraph::new_undirected();
    let mut node_from_id: BTreeMap<i32, NodeIndex> = BTreeMap::new();

    for (&id, area) in areas {
        if !area.outside {
            node_from_id.insert(id, graph.add_node(id));
        }
    }
    for (&id, area) in areas {
        let Some(&node) = node_from_id.get(&id) else {
            continue;
        };
        for (&other, edges) in &area.self_edges {
            if other > id
                && let Some(&other_node) = node_from_id.get(&other)
            {
                graph.add_edge(node, other_node, edges.len());
            }
        }
    }
    graph
}

/// Перечисляет клики из `clique_size` кусков (3, 4 или 5), отсортированные
/// по убыванию слабейшей границы; надёжные кандидаты пробуются первыми.
#[must_use]
pub fn find_cliques(areas: &BTreeMap<i32, Area>, clique_size: usize) -> Vec<CliqueCandidate> {
    assert!((3..=5).contains(&clique_size), "clique size out of range");
    let graph = adjacency_graph(areas);

    let id_of = |node: NodeIndex| graph[node];
    let adjacent = |a: i32, b: i32| {
        graph.edge_indices().any(|e| {
            let (x, y) = graph.edge_endpoints(e).expect("edge endpoints");
            (id_of(x) == a && id_of(y) == b) || (id_of(x) == b && id_of(y) == a)
        })
    };

    // Рёбра как 2-клики, затем наращивание по одной вершине: новая вершина
    // больше всех имеющихся и смежна с каждой.
    let mut cliques: Vec<Vec<i32>> = graph
        .edge_indices()
        .map(|e| {
            let (a, b) = graph.edge_endpoints(e).expect("edge endpoints");
            let mut pair = vec![id_of(a), id_of(b)];
            pair.sort_unstable();
            pair
        })
        .collect();

    let vertices: Vec<i32> = graph.node_indices().map(id_of).collect();
    for _ in 2..clique_size {
        let mut extended = Vec::new();
        for clique in &cliques {
            let &last = clique.last().expect("clique is non-empty");
            for &v in &vertices {
                if v > last && clique.iter().all(|&m| adjacent(m, v)) {
                    let mut bigger = clique.clone();
                    bigger.push(v);
                    extended.push(bigger);
                }
            }
        }
        cliques = extended;
    }

    let mut candidates: Vec<CliqueCandidate> = cliques
        .into_iter()
        .map(|chunk_ids| {
            let mut min_boundary = usize::MAX;
            for (i, &a) in chunk_ids.iter().enumerate() {
                for &b in &chunk_ids[i + 1..] {
                    min_boundary = min_boundary
                        .min(areas[&a].border_len(b))
                        .min(areas[&b].border_len(a));
                }
            }
            let total_size = chunk_ids.iter().map(|id| areas[id].members.len()).sum();
            CliqueCandidate {
                chunk_ids,
                min_boundary,
                total_size,
            }
        })
        .collect();

    candidates.sort_by(|a, b| {
        b.min_boundary
            .cmp(&a.min_boundary)
            .then(b.total_size.cmp(&a.total_size))
            .then(a.chunk_ids.cmp(&b.chunk_ids))
    });
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
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

    /// Три внутренних сектора, попарно смежных, в кольце краевого куска.
    fn three_sectors_in_ring() -> BTreeMap<i32, Area> {
        let mut partition = Partition::new();
        for (&cube, _) in &disc(3) {
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
        areas_from_partition(&partition)
    }

    #[test]
    fn test_find_cliques_excludes_outside_areas() {
        let areas = three_sectors_in_ring();
        assert!(areas[&9].outside);
        assert!(!areas[&0].outside);

        let candidates = find_cliques(&areas, 3);
        assert_eq!(candidates.len(), 1);
        let clique = &candidates[0];
        assert_eq!(clique.chunk_ids, vec![0, 1, 2]);
        assert!(clique.min_boundary >= 1);
        assert_eq!(
            clique.total_size,
            areas[&0].members.len() + areas[&1].members.len() + areas[&2].members.len()
        );

        // Клика попарно смежна по self_edges.
        for &a in &clique.chunk_ids {
            for &b in &clique.chunk_ids {
                if a != b {
                    assert!(areas[&a].self_edges.contains_key(&b));
                }
            }
        }
        assert!(find_cliques(&areas, 4).is_empty());
    }

    #[test]
    fn test_generate_chunks_partitions_whole_domain() {
        let weights = disc(6);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let areas = generate_chunks(&weights, 5, &mut rng);
        assert_eq!(areas.len(), 5);
        let total: usize = areas.values().map(|a| a.members.len()).sum();
        assert_eq!(total, weights.len());
        for area in areas.values() {
            assert!(!area.boundary.is_empty());
        }
    }
}
