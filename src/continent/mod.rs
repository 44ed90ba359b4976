pub mod assemble;
pub mod chunks;

use crate::cube::Cube;
use serde::Serialize;

/// Графство: связная группа клеток с собственной столицей и тегом местности.
#[derive(Debug, Clone, Serialize)]
pub struct County {
    /// Столичная клетка; всегда первая в `cubes`.
    pub capital: Cube,
    pub cubes: Vec<Cube>,
    /// Тег шаблона местности для экспортёров.
    pub terrain: String,
}

impl County {
    /// Собирает графство из множества клеток со столицей впереди.
    #[must_use]
    pub fn new(capital: Cube, members: impl IntoIterator<Item = Cube>, terrain: String) -> Self {
        let mut cubes = vec![capital];
        cubes.extend(members.into_iter().filter(|&c| c != capital));
        Self {
            capital,
            cubes,
            terrain,
        }
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.cubes.len()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Duchy {
    pub counties: Vec<County>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Kingdom {
    /// Герцогства; первое — столичное, его первое графство — столичное.
    pub duchies: Vec<Duchy>,
    /// Столичный гекс королевства.
    pub capital: Cube,
    /// Незанятая клетка рядом со столицей — затравка морского региона.
    pub sea_center: Cube,
}

/// Один собранный континент: полная иерархия поверх клики макро-кусков.
///
/// Порядок обхода (центральные графства, затем пограничные герцогства,
/// затем королевства) фиксирует нумерацию провинций ниже по конвейеру;
/// менять его нельзя.
#[derive(Debug, Clone, Serialize)]
pub struct Continent {
    /// Куски-участники клики.
    pub chunk_ids: Vec<i32>,
    /// Якорные гексы (углы треугольников клики); зарезервированы, в графства
    /// не входят.
    pub anchors: Vec<Cube>,
    pub central_counties: Vec<County>,
    pub border_duchies: Vec<Duchy>,
    pub kingdoms: Vec<Kingdom>,
}

impl Continent {
    fn counties(&self) -> impl Iterator<Item = &County> {
        self.central_counties
            .iter()
            .chain(self.border_duchies.iter().flat_map(|d| d.counties.iter()))
            .chain(
                self.kingdoms
                    .iter()
                    .flat_map(|k| k.duchies.iter())
                    .flat_map(|d| d.counties.iter()),
            )
    }

    /// Столичная клетка каждого графства в порядке нумерации провинций.
    ///
    /// Порядок обхода фиксирован (центральные графства, затем пограничные
    /// герцогства, затем королевства) — на него завязана нумерация
    /// провинций у потребителей. Список параллелен `terr_templates`.
    #[must_use]
    pub fn cube_from_pid(&self) -> Vec<Cube> {
        self.counties().map(|c| c.capital).collect()
    }

    /// Теги местности по одному на графство, параллельно `cube_from_pid`.
    #[must_use]
    pub fn terr_templates(&self) -> Vec<String> {
        self.counties().map(|c| c.terrain.clone()).collect()
    }

    /// Затравки морских регионов — по одной на королевство.
    #[must_use]
    pub fn sea_centers(&self) -> Vec<Cube> {
        self.kingdoms.iter().map(|k| k.sea_center).collect()
    }

    /// Суммарное число клеток во всех графствах.
    #[must_use]
    pub fn total_cubes(&self) -> usize {
        self.counties().map(County::size).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn county(q: i32, terrain: &str) -> County {
        let capital = Cube::new(q, -q, 0);
        County::new(capital, [capital, Cube::new(q, -q - 1, 1)], terrain.into())
    }

    #[test]
    fn test_county_capital_goes_first_without_duplicates() {
        let c = county(0, "plains");
        assert_eq!(c.cubes[0], c.capital);
        assert_eq!(c.size(), 2);
    }

    #[test]
    fn test_flatten_order_is_stable() {
        let continent = Continent {
            chunk_ids: vec![0, 1, 2],
            anchors: vec![Cube::default()],
            central_counties: vec![county(10, "farmlands")],
            border_duchies: vec![Duchy {
                counties: vec![county(20, "hills")],
            }],
            kingdoms: vec![Kingdom {
                duchies: vec![Duchy {
                    counties: vec![county(30, "plains")],
                }],
                capital: Cube::new(30, -30, 0),
                sea_center: Cube::new(31, -31, 0),
            }],
        };

        let pids = continent.cube_from_pid();
        assert_eq!(pids.len(), continent.terr_templates().len());
        assert_eq!(pids[0], Cube::new(10, -10, 0));
        assert_eq!(continent.total_cubes(), 6);
        assert_eq!(
            continent.terr_templates(),
            vec!["farmlands", "hills", "plains"]
        );
        assert_eq!(continent.sea_centers(), vec![Cube::new(31, -31, 0)]);
    }
}
