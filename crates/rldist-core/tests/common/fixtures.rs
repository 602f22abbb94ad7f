//! Trial collections shared by the integration tests

#![allow(dead_code)]

use rldist_core::{DataSet, ReferenceArchive};

const NAN: f64 = f64::NAN;

/// Two functions in 5-D and one in 20-D, two runs each
///
/// Largest budgets: 200 x dim in 5-D, 1500 x dim in 20-D.
pub fn bbob_like_records() -> Vec<DataSet> {
    vec![
        DataSet::from_rows(
            "ALG-A",
            1,
            5,
            vec![
                vec![10.0, 5.0, 10.0],
                vec![1e-1, 50.0, 100.0],
                vec![1e-4, 200.0, NAN],
                vec![1e-8, NAN, NAN],
            ],
            vec![
                vec![5.0, 100.0, 80.0],
                vec![50.0, 1e-2, 1e-1],
                vec![500.0, 1e-6, 1e-3],
                vec![1000.0, 1e-6, 1e-5],
            ],
            vec![500.0, 1000.0],
        )
        .unwrap(),
        DataSet::from_rows(
            "ALG-A",
            2,
            5,
            vec![vec![10.0, 25.0, 30.0], vec![1e-1, NAN, NAN]],
            vec![vec![5.0, 50.0, 40.0], vec![250.0, 1e-1, 2e-1]],
            vec![250.0, 250.0],
        )
        .unwrap(),
        DataSet::from_rows(
            "ALG-A",
            1,
            20,
            vec![vec![10.0, 40.0, 60.0], vec![1e-8, 4000.0, NAN]],
            vec![vec![20.0, 1e3, 1e3], vec![20000.0, 1e-9, 0.0]],
            vec![30000.0, 30000.0],
        )
        .unwrap(),
    ]
}

/// A second algorithm on function 2 in 5-D and function 3 in 10-D
pub fn second_algorithm_records() -> Vec<DataSet> {
    vec![
        DataSet::from_rows(
            "ALG-B",
            2,
            5,
            vec![vec![10.0, 15.0, 20.0], vec![1e-8, 400.0, 900.0]],
            vec![vec![5.0, 30.0, 20.0], vec![2000.0, 1e-9, 1e-9]],
            vec![2000.0, 2000.0],
        )
        .unwrap(),
        DataSet::from_rows(
            "ALG-B",
            3,
            10,
            vec![vec![10.0, 15.0, 20.0]],
            vec![vec![10.0, 30.0, 20.0]],
            vec![100.0, 100.0],
        )
        .unwrap(),
    ]
}

/// Reference run lengths covering functions 1 and 2 in 5-D
pub fn reference_archive() -> ReferenceArchive {
    ReferenceArchive::from_json(
        r#"{
            "REF-1": {
                "1": { "5": [ { "target": 1e-8, "evals": [100.0, null], "max_evals": [1000, 1000] } ] },
                "2": { "5": [ { "target": 1e-8, "evals": [50.0, 150.0], "max_evals": [1000, 1000] } ] }
            },
            "REF-2": {
                "1": { "5": [ { "target": 1e-8, "evals": [30.0], "max_evals": [1000] } ] }
            }
        }"#,
    )
    .unwrap()
}
