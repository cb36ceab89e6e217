// src/core/indexing/vector/kdtree/tests/test_search.rs

#[cfg(test)]
mod search_tests {
    use crate::core::indexing::vector::kdtree::error::KdTreeError;
    use crate::core::indexing::vector::kdtree::tree::KdTree;
    use crate::core::vector::similarity::squared_euclidean_distance;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn scenario_tree() -> KdTree<u64> {
        let mut tree = KdTree::new(2);
        tree.insert(vec![1.0, 2.0], Some(201)).unwrap();
        tree.insert(vec![3.0, 4.0], Some(202)).unwrap();
        tree.insert(vec![5.0, 6.0], Some(203)).unwrap();
        tree
    }

    fn random_points(rng: &mut StdRng, count: usize, dimension: usize) -> Vec<Vec<f64>> {
        (0..count)
            .map(|_| (0..dimension).map(|_| rng.gen_range(-100.0..100.0)).collect())
            .collect()
    }

    // Index of the first point with the smallest squared distance.
    fn brute_force_nearest(points: &[Vec<f64>], target: &[f64]) -> usize {
        let mut best = 0;
        for (i, p) in points.iter().enumerate() {
            if squared_euclidean_distance(target, p) < squared_euclidean_distance(target, &points[best]) {
                best = i;
            }
        }
        best
    }

    #[test]
    fn test_nearest_empty_tree() {
        let tree: KdTree<u64> = KdTree::new(2);
        assert_eq!(tree.nearest(&[1.0, 1.0]).unwrap(), None);
        assert!(tree.nearest_neighbor(&[1.0, 1.0]).unwrap().is_none());

        let inferred: KdTree<u64> = KdTree::with_inferred_dimension();
        assert_eq!(inferred.nearest(&[1.0, 1.0, 1.0]).unwrap(), None);
    }

    #[test]
    fn test_nearest_scenario_tie_resolved_by_traversal_order() {
        // (1,2) and (3,4) are both sqrt(2) away from (2,3). The root (1,2)
        // is visited first and (3,4) is not strictly closer, so 201 wins.
        let tree = scenario_tree();
        assert_eq!(tree.nearest(&[2.0, 3.0]).unwrap(), Some(201));

        let neighbor = tree.nearest_neighbor(&[2.0, 3.0]).unwrap().unwrap();
        assert_eq!(neighbor.point, &[1.0, 2.0]);
        assert_eq!(neighbor.id, Some(&201));
        assert_relative_eq!(neighbor.distance, 2.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_nearest_single_point_tree() {
        let mut tree = KdTree::new(2);
        tree.insert(vec![1.0, 2.0], Some("only")).unwrap();

        let neighbor = tree.nearest_neighbor(&[10.0, -3.0]).unwrap().unwrap();
        assert_eq!(neighbor.id, Some(&"only"));
        assert_relative_eq!(neighbor.distance, (81.0_f64 + 25.0).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_nearest_exact_match() {
        let tree = scenario_tree();
        let neighbor = tree.nearest_neighbor(&[5.0, 6.0]).unwrap().unwrap();
        assert_eq!(neighbor.id, Some(&203));
        assert_eq!(neighbor.distance, 0.0);
    }

    #[test]
    fn test_nearest_crosses_splitting_plane() {
        // The target falls on the right of the root, but the closest point
        // lives in the left subtree just across the plane.
        let mut tree = KdTree::new(2);
        tree.insert(vec![5.0, 5.0], Some(1u64)).unwrap();
        tree.insert(vec![4.9, 0.0], Some(2)).unwrap();
        tree.insert(vec![9.0, 0.0], Some(3)).unwrap();

        assert_eq!(tree.nearest(&[5.1, 0.0]).unwrap(), Some(2));
        // Root, right child, then the left child across the plane.
        assert_eq!(tree.nearest_visits(&[5.1, 0.0]).unwrap(), 3);
    }

    #[test]
    fn test_far_branch_pruned_when_plane_is_too_far() {
        // Pruning must not change the answer: a far-away left subtree is
        // skipped and the near point is returned.
        let mut tree = KdTree::new(1);
        tree.insert(vec![0.0], Some('r')).unwrap();
        tree.insert(vec![-100.0], Some('l')).unwrap();
        tree.insert(vec![10.0], Some('n')).unwrap();

        assert_eq!(tree.nearest(&[9.0]).unwrap(), Some('n'));
        assert_eq!(tree.nearest(&[-60.0]).unwrap(), Some('l'));
        assert_eq!(tree.nearest_visits(&[9.0]).unwrap(), 2);
    }

    fn separated_tree() -> KdTree<u32> {
        // Root 50 with a left cluster {2, 5, 8} and a right cluster {102, 105, 108}.
        let mut tree = KdTree::new(1);
        for x in [50, 5, 105, 2, 8, 102, 108] {
            tree.insert(vec![f64::from(x)], Some(x)).unwrap();
        }
        tree
    }

    #[test]
    fn test_nearest_skips_subtrees_beyond_best_distance() {
        let tree = separated_tree();
        assert_eq!(tree.nearest(&[2.0]).unwrap(), Some(2));
        // Root, 5 and 2 only: the 8 subtree and the whole right cluster are pruned.
        assert_eq!(tree.nearest_visits(&[2.0]).unwrap(), 3);

        assert_eq!(KdTree::<u32>::new(1).nearest_visits(&[0.0]).unwrap(), 0);
    }

    #[test]
    fn test_k_nearest_skips_subtrees_beyond_kth_distance() {
        let tree = separated_tree();
        let ids: Vec<u32> =
            tree.k_nearest(&[2.0], 3).unwrap().iter().map(|n| *n.id.unwrap()).collect();
        assert_eq!(ids, vec![2, 5, 8]);
        // Root, 5, 2 and 8; the right cluster is never reached.
        assert_eq!(tree.k_nearest_visits(&[2.0], 3).unwrap(), 4);
        assert_eq!(tree.k_nearest_visits(&[2.0], 1).unwrap(), 3);
        // Asking for every point visits every node.
        assert_eq!(tree.k_nearest_visits(&[2.0], 7).unwrap(), 7);
    }

    #[test]
    fn test_target_on_hyperplane_searches_right_first() {
        // (2,0) and (-2,0) are equally far from (0,0). The target sits on the
        // root's splitting plane x = 0, so the right child is the near branch
        // and its point is kept.
        let mut tree = KdTree::new(2);
        tree.insert(vec![0.0, 10.0], Some("root")).unwrap();
        tree.insert(vec![2.0, 0.0], Some("right")).unwrap();
        tree.insert(vec![-2.0, 0.0], Some("left")).unwrap();

        assert_eq!(tree.nearest(&[0.0, 0.0]).unwrap(), Some("right"));
    }

    #[test]
    fn test_repeated_point_query_returns_zero_distance() {
        let mut tree = KdTree::new(2);
        tree.insert(vec![1.0, 1.0], Some(1u64)).unwrap();
        tree.insert(vec![3.0, 3.0], Some(7)).unwrap();
        tree.insert(vec![3.0, 3.0], Some(8)).unwrap();

        let neighbor = tree.nearest_neighbor(&[3.0, 3.0]).unwrap().unwrap();
        assert_eq!(neighbor.distance, 0.0);
        // The first copy is reached first and the second is not strictly closer.
        assert_eq!(neighbor.id, Some(&7));
    }

    #[test]
    fn test_nearest_point_without_id() {
        let mut tree: KdTree<u64> = KdTree::new(1);
        tree.insert(vec![0.0], None).unwrap();
        tree.insert(vec![10.0], Some(10)).unwrap();

        assert_eq!(tree.nearest(&[1.0]).unwrap(), None);
        let neighbor = tree.nearest_neighbor(&[1.0]).unwrap().unwrap();
        assert_eq!(neighbor.point, &[0.0]);
        assert!(neighbor.id.is_none());

        assert_eq!(tree.nearest(&[9.0]).unwrap(), Some(10));
    }

    #[test]
    fn test_query_dimension_mismatch() {
        let tree = scenario_tree();
        let result = tree.nearest(&[1.0, 2.0, 3.0]);
        assert_eq!(result, Err(KdTreeError::DimensionMismatch { expected: 2, found: 3 }));
        assert!(matches!(
            tree.k_nearest(&[1.0], 2),
            Err(KdTreeError::DimensionMismatch { expected: 2, found: 1 })
        ));

        // The guard applies to an empty tree with a fixed dimension as well.
        let empty: KdTree<u64> = KdTree::new(2);
        assert!(matches!(empty.nearest(&[1.0]), Err(KdTreeError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_nearest_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(42);
        for dimension in 1..=5 {
            let points = random_points(&mut rng, 250, dimension);
            let mut tree = KdTree::new(dimension);
            for (i, p) in points.iter().enumerate() {
                tree.insert(p.clone(), Some(i)).unwrap();
            }

            for target in random_points(&mut rng, 100, dimension) {
                let expected = brute_force_nearest(&points, &target);
                let neighbor = tree.nearest_neighbor(&target).unwrap().unwrap();
                assert_eq!(neighbor.id, Some(&expected), "dimension {} target {:?}", dimension, target);
                assert_relative_eq!(
                    neighbor.distance,
                    squared_euclidean_distance(&target, &points[expected]).sqrt(),
                    epsilon = 1e-9
                );
            }
        }
    }

    #[test]
    fn test_k_nearest_matches_sorted_brute_force() {
        let mut rng = StdRng::seed_from_u64(7);
        let dimension = 3;
        let points = random_points(&mut rng, 200, dimension);
        let mut tree = KdTree::new(dimension);
        for (i, p) in points.iter().enumerate() {
            tree.insert(p.clone(), Some(i)).unwrap();
        }

        for target in random_points(&mut rng, 25, dimension) {
            let mut expected: Vec<(usize, f64)> = points
                .iter()
                .enumerate()
                .map(|(i, p)| (i, squared_euclidean_distance(&target, p).sqrt()))
                .collect();
            expected.sort_by(|a, b| a.1.total_cmp(&b.1));
            expected.truncate(5);

            let found = tree.k_nearest(&target, 5).unwrap();
            assert_eq!(found.len(), 5);
            for (neighbor, (index, distance)) in found.iter().zip(expected.iter()) {
                assert_eq!(neighbor.id, Some(index));
                assert_relative_eq!(neighbor.distance, *distance, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_k_nearest_first_is_nearest() {
        let tree = scenario_tree();
        let found = tree.k_nearest(&[2.0, 3.0], 1).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, Some(&201));
    }

    #[test]
    fn test_k_nearest_ties_keep_traversal_order() {
        let mut tree = KdTree::new(2);
        tree.insert(vec![0.0, 10.0], Some("root")).unwrap();
        tree.insert(vec![2.0, 0.0], Some("right")).unwrap();
        tree.insert(vec![-2.0, 0.0], Some("left")).unwrap();

        let found = tree.k_nearest(&[0.0, 0.0], 3).unwrap();
        let ids: Vec<&str> = found.iter().filter_map(|n| n.id.copied()).collect();
        assert_eq!(ids, vec!["right", "left", "root"]);

        let top = tree.k_nearest(&[0.0, 0.0], 1).unwrap();
        assert_eq!(top[0].id, Some(&"right"));
    }

    #[test]
    fn test_k_nearest_k_greater_than_points() {
        let tree = scenario_tree();
        let found = tree.k_nearest(&[0.0, 0.0], 10).unwrap();
        assert_eq!(found.len(), 3);
        let ids: Vec<u64> = found.iter().filter_map(|n| n.id.copied()).collect();
        assert_eq!(ids, vec![201, 202, 203]);
        assert_relative_eq!(found[0].distance, 5.0_f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(found[2].distance, 61.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_k_nearest_k_is_zero_or_tree_empty() {
        let tree = scenario_tree();
        assert!(tree.k_nearest(&[1.0, 1.0], 0).unwrap().is_empty());

        let empty: KdTree<u64> = KdTree::new(2);
        assert!(empty.k_nearest(&[1.0, 1.0], 3).unwrap().is_empty());
    }
}
