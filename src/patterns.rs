// patterns.rs - Named Game of Life patterns, stored as (row, col) offsets

use crate::life::Lifeform;

pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(usize, usize)],
}

impl Pattern {
    pub fn lifeform(&self) -> Lifeform {
        Lifeform::from_cells(self.cells)
    }
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "Glider",
        cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
    },
    Pattern {
        name: "Blinker",
        cells: &[(0, 0), (0, 1), (0, 2)],
    },
    Pattern {
        name: "Toad",
        cells: &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
    },
    Pattern {
        name: "Beacon",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 2), (2, 3), (3, 2), (3, 3)],
    },
    Pattern {
        name: "Pulsar",
        cells: &[
            // Top half
            (0, 2), (0, 3), (0, 4), (0, 8), (0, 9), (0, 10),
            (2, 0), (2, 5), (2, 7), (2, 12),
            (3, 0), (3, 5), (3, 7), (3, 12),
            (4, 0), (4, 5), (4, 7), (4, 12),
            (5, 2), (5, 3), (5, 4), (5, 8), (5, 9), (5, 10),
            // Bottom half (mirrored)
            (7, 2), (7, 3), (7, 4), (7, 8), (7, 9), (7, 10),
            (8, 0), (8, 5), (8, 7), (8, 12),
            (9, 0), (9, 5), (9, 7), (9, 12),
            (10, 0), (10, 5), (10, 7), (10, 12),
            (12, 2), (12, 3), (12, 4), (12, 8), (12, 9), (12, 10),
        ],
    },
    Pattern {
        name: "R-pentomino",
        cells: &[(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)],
    },
    Pattern {
        name: "Gosper Glider Gun",
        cells: &[
            (4, 0), (4, 1), (5, 0), (5, 1),
            (4, 10), (5, 10), (6, 10), (3, 11), (7, 11), (2, 12), (8, 12),
            (2, 13), (8, 13), (5, 14), (3, 15), (7, 15), (4, 16), (5, 16),
            (6, 16), (5, 17), (2, 20), (3, 20), (4, 20), (2, 21), (3, 21),
            (4, 21), (1, 22), (5, 22), (0, 24), (1, 24), (5, 24), (6, 24),
            (2, 34), (3, 34), (2, 35), (3, 35),
        ],
    },
];

pub fn find(name: &str) -> Option<&'static Pattern> {
    PATTERNS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::Automaton;
    use crate::config::GridOptions;
    use crate::life::GameOfLife;
    use crate::surface::PixelBuffer;

    fn run(pattern: &Pattern, size: usize, generations: usize) -> (Vec<usize>, Vec<usize>) {
        let mut life =
            GameOfLife::new(PixelBuffer::new(size, size).unwrap(), &GridOptions::default()).unwrap();
        life.spawn_centered(&pattern.lifeform());
        let before = life.cells().grid().cells().to_vec();
        for _ in 0..generations {
            life.step().unwrap();
        }
        (before, life.cells().grid().cells().to_vec())
    }

    #[test]
    fn shapes_are_normalized() {
        let glider = find("glider").unwrap().lifeform();
        assert_eq!((glider.width(), glider.height()), (3, 3));

        let gun = find("Gosper Glider Gun").unwrap().lifeform();
        assert_eq!((gun.width(), gun.height()), (36, 9));
        assert_eq!(gun.live_cells().count(), 36);

        let pulsar = find("pulsar").unwrap().lifeform();
        assert_eq!((pulsar.width(), pulsar.height()), (13, 13));
        assert!(find("spaceship").is_none());
    }

    #[test]
    fn oscillators_return_to_start() {
        for (name, period) in [("Blinker", 2), ("Toad", 2), ("Beacon", 2), ("Pulsar", 3)] {
            let (before, after) = run(find(name).unwrap(), 20, period);
            assert_eq!(before, after, "{name}");
        }
    }

    #[test]
    fn blinker_is_not_still() {
        let (before, after) = run(find("Blinker").unwrap(), 8, 1);
        assert_ne!(before, after);
    }
}
