use nalgebra::{point, Point3};

use tetrafold::{Error, Octant, Octree, TetMesh};

/// One positively oriented unit right tetrahedron.
fn single_tet() -> (Vec<Point3<f64>>, Vec<[u32; 4]>) {
    (
        vec![
            point![0.0, 0.0, 0.0],
            point![1.0, 0.0, 0.0],
            point![0.0, 1.0, 0.0],
            point![0.0, 0.0, 1.0],
        ],
        vec![[0, 1, 2, 3]],
    )
}

/// The unit cube cut into six tetrahedra sharing the main diagonal.
fn cube_six_tets() -> (Vec<Point3<f64>>, Vec<[u32; 4]>) {
    // Corner b has coordinates (b & 1, b >> 1 & 1, b >> 2 & 1).
    let vertices = (0..8u32)
        .map(|b| {
            point![
                (b & 1) as f64,
                (b >> 1 & 1) as f64,
                (b >> 2 & 1) as f64
            ]
        })
        .collect();
    let elements = vec![
        [0, 1, 3, 7],
        [0, 1, 5, 7],
        [0, 2, 3, 7],
        [0, 2, 6, 7],
        [0, 4, 5, 7],
        [0, 4, 6, 7],
    ];
    (vertices, elements)
}

/// A 27-vertex, 49-element tetrahedralization of a cube centered on the
/// origin.
fn cube_49_tets() -> (Vec<Point3<f64>>, Vec<[u32; 4]>) {
    let vertices = vec![
        point![0.037168885097203, 0.037168885097203, 0.500000000000000],
        point![0.000000000000000, -0.500000000000000, 0.500000000000000],
        point![-0.500000000000000, -0.500000000000000, 0.000000000000000],
        point![-0.037168885097204, -0.500000000000000, -0.037168885097203],
        point![-0.500000000000000, 0.500000000000000, 0.000000000000000],
        point![0.000000000000000, 0.500000000000000, 0.500000000000000],
        point![-0.500000000000000, 0.000000000000000, 0.500000000000000],
        point![-0.500000000000000, -0.500000000000000, 0.500000000000000],
        point![0.500000000000000, -0.037168885097204, -0.037168885097203],
        point![0.500000000000000, -0.500000000000000, -0.500000000000000],
        point![0.000000000000000, -0.500000000000000, -0.500000000000000],
        point![0.037168885097203, -0.037168885097203, -0.500000000000000],
        point![0.500000000000000, 0.000000000000000, -0.500000000000000],
        point![0.037168885097203, 0.500000000000000, -0.037168885097203],
        point![0.000000000000000, 0.500000000000000, -0.500000000000000],
        point![0.500000000000000, 0.500000000000000, 0.000000000000000],
        point![0.500000000000000, 0.500000000000000, -0.500000000000000],
        point![-0.183512429123672, 0.007912059693842, -0.225483911425726],
        point![-0.500000000000000, 0.500000000000000, -0.500000000000000],
        point![-0.500000000000000, 0.000000000000000, -0.500000000000000],
        point![-0.500000000000000, -0.500000000000000, -0.500000000000000],
        point![-0.500000000000000, 0.037168885097203, -0.037168885097203],
        point![0.500000000000000, -0.500000000000000, 0.000000000000000],
        point![0.500000000000000, 0.000000000000000, 0.500000000000000],
        point![0.500000000000000, 0.500000000000000, 0.500000000000000],
        point![-0.500000000000000, 0.500000000000000, 0.500000000000000],
        point![0.500000000000000, -0.500000000000000, 0.500000000000000],
    ];
    let elements = vec![
        [0, 1, 2, 3],
        [4, 5, 6, 0],
        [2, 7, 1, 6],
        [8, 9, 10, 11],
        [8, 12, 9, 11],
        [13, 14, 12, 11],
        [15, 13, 16, 12],
        [2, 1, 0, 6],
        [13, 14, 16, 12],
        [17, 13, 11, 14],
        [0, 13, 4, 5],
        [17, 4, 14, 18],
        [17, 19, 11, 10],
        [17, 20, 19, 10],
        [17, 2, 0, 21],
        [17, 2, 19, 20],
        [17, 10, 8, 3],
        [8, 22, 1, 3],
        [17, 18, 14, 19],
        [0, 2, 17, 3],
        [17, 19, 14, 11],
        [0, 4, 21, 6],
        [17, 0, 4, 21],
        [17, 13, 14, 4],
        [2, 6, 0, 21],
        [0, 15, 13, 5],
        [8, 13, 12, 11],
        [0, 8, 13, 15],
        [8, 15, 12, 13],
        [8, 22, 10, 9],
        [1, 22, 8, 23],
        [8, 22, 3, 10],
        [17, 8, 11, 13],
        [0, 15, 5, 24],
        [6, 5, 4, 25],
        [17, 0, 3, 8],
        [8, 10, 17, 11],
        [17, 21, 19, 2],
        [17, 0, 8, 13],
        [17, 0, 13, 4],
        [17, 3, 20, 10],
        [17, 21, 18, 19],
        [17, 2, 20, 3],
        [17, 4, 18, 21],
        [1, 8, 0, 23],
        [23, 0, 15, 8],
        [23, 0, 24, 15],
        [0, 8, 1, 3],
        [23, 1, 22, 26],
    ];
    (vertices, elements)
}

#[test]
fn single_element_under_threshold_stays_a_leaf() {
    let (vertices, elements) = single_tet();
    let mesh = TetMesh::new(&vertices, &elements);
    let tree = Octree::new(mesh, 1, 4).unwrap();

    assert_eq!(tree.n_nodes(), 1);
    assert!(tree.root().is_leaf());
    assert_eq!(tree.root().elements(), &[0]);
    assert!((tree.root().volume() - 1.0 / 6.0).abs() < 1e-12);
}

#[test]
fn root_box_bounds_all_vertices() {
    let (vertices, elements) = cube_49_tets();
    let mesh = TetMesh::new(&vertices, &elements);
    let tree = Octree::new(mesh, 4, 4).unwrap();

    let root = tree.root().aabb();
    for v in &vertices {
        assert!(root.contains(v));
    }
    for eid in 0..elements.len() as u32 {
        assert!(root.contains(&tree.centroid(eid)));
    }
}

#[test]
fn cube_splits_once() {
    let (vertices, elements) = cube_six_tets();
    let mesh = TetMesh::new(&vertices, &elements);
    let tree = Octree::new(mesh, 2, 4).unwrap();

    // The root splits exactly once: itself plus eight children.
    assert_eq!(tree.n_nodes(), 9);
    assert!(!tree.root().is_leaf());
    let children = tree.root().children().unwrap();
    for &child in children {
        assert!(tree.node(child).unwrap().is_leaf());
    }

    // Every element passed through the root, and the leaves partition them.
    assert_eq!(tree.root().n_elements(), 6);
    let leaf_total: usize = children
        .iter()
        .map(|&c| tree.node(c).unwrap().n_elements())
        .sum();
    assert_eq!(leaf_total, 6);

    assert!((tree.root().volume() - 1.0).abs() < 1e-12);
}

#[test]
fn split_is_atomic() {
    let (vertices, elements) = cube_49_tets();
    let mesh = TetMesh::new(&vertices, &elements);
    let tree = Octree::new(mesh, 4, 4).unwrap();

    // Every node either has no children or all eight, and each child records
    // the correct parent, depth, and octant box.
    for node in tree.nodes() {
        match node.children() {
            None => assert!(node.is_leaf()),
            Some(children) => {
                for oct in Octant::all() {
                    let child = tree.node(children[oct.index()]).unwrap();
                    assert_eq!(child.parent(), Some(node.index()));
                    assert_eq!(child.depth(), node.depth() + 1);
                    assert_eq!(*child.aabb(), node.child_corners(oct));
                }
            }
        }
    }
}

#[test]
fn depth_cap_suppresses_splitting() {
    let (vertices, elements) = cube_49_tets();
    let elements = &elements[..10];
    let mesh = TetMesh::new(&vertices, elements);
    let tree = Octree::new(mesh, 1, 0).unwrap();

    assert_eq!(tree.n_nodes(), 1);
    assert!(tree.root().is_leaf());
    assert_eq!(tree.root().n_elements(), 10);
}

#[test]
fn leaf_threshold_respected() {
    let (vertices, elements) = cube_49_tets();
    let mesh = TetMesh::new(&vertices, &elements);
    let tree = Octree::new(mesh, 4, 4).unwrap();

    for node in tree.nodes() {
        if node.is_leaf() && node.depth() < tree.max_depth() {
            assert!(node.n_elements() <= tree.max_per_node());
        }
    }
}

#[test]
fn volume_is_conserved() {
    let (vertices, elements) = cube_49_tets();
    let mesh = TetMesh::new(&vertices, &elements);
    let tree = Octree::new(mesh, 4, 4).unwrap();

    let expected = tree.mesh().total_volume();
    assert!((tree.root().volume() - expected).abs() < 1e-12);

    // The mesh tiles the unit cube.
    assert!((tree.root().volume() - 1.0).abs() < 1e-12);
}

#[test]
fn every_element_is_found_in_a_leaf() {
    let (vertices, elements) = cube_49_tets();
    let mesh = TetMesh::new(&vertices, &elements);
    let tree = Octree::new(mesh, 4, 4).unwrap();

    for eid in 0..elements.len() as u32 {
        let leaf = tree.find_leaf_containing(eid).unwrap();
        assert!(leaf.is_leaf());
        assert!(leaf.elements().contains(&eid));
        assert!(leaf.aabb().contains(&tree.centroid(eid)));
    }
}

#[test]
fn lookup_of_unknown_element_is_a_miss_not_an_error() {
    let (vertices, elements) = cube_six_tets();
    let mesh = TetMesh::new(&vertices, &elements);
    let tree = Octree::new(mesh, 2, 4).unwrap();

    assert_eq!(tree.find_leaf_index_containing(999), None);
    assert!(tree.find_leaf_containing(999).is_none());
}

#[test]
fn boundary_centroids_route_deterministically() {
    // Two degenerate elements whose centroids sit just on either side of the
    // root midpoint plane x = 0.5: exactly on it goes right, below goes left.
    let vertices = vec![
        point![0.0, 0.0, 0.0],
        point![1.0, 1.0, 1.0],
        point![0.5, 0.25, 0.25],
        point![0.25, 0.25, 0.25],
    ];
    let elements = vec![[2u32, 2, 2, 2], [3, 3, 3, 3]];
    let mesh = TetMesh::new(&vertices, &elements);
    let tree = Octree::new(mesh, 1, 4).unwrap();

    assert_eq!(tree.which_child(0, 0).unwrap(), Octant::BBR);
    assert_eq!(tree.which_child(0, 1).unwrap(), Octant::BBL);

    let right = tree.find_leaf_containing(0).unwrap();
    let left = tree.find_leaf_containing(1).unwrap();
    assert_ne!(right.index(), left.index());
    assert_eq!(right.r_min().x, 0.5);
    assert_eq!(left.r_max().x, 0.5);
}

#[test]
fn which_child_checks_the_node_index() {
    let (vertices, elements) = single_tet();
    let mesh = TetMesh::new(&vertices, &elements);
    let tree = Octree::new(mesh, 1, 4).unwrap();

    assert!(matches!(
        tree.which_child(42, 0),
        Err(Error::InvalidIndex(42))
    ));
}

#[test]
fn empty_mesh_is_rejected() {
    let vertices: Vec<Point3<f64>> = Vec::new();
    let elements: Vec<[u32; 4]> = Vec::new();
    let mesh = TetMesh::new(&vertices, &elements);

    assert!(matches!(Octree::new(mesh, 1, 4), Err(Error::EmptyMesh)));
}

#[test]
fn dot_export() {
    let (vertices, elements) = cube_six_tets();
    let mesh = TetMesh::new(&vertices, &elements);
    let tree = Octree::new(mesh, 2, 4).unwrap();

    let dot = tree.dot_string();
    assert!(dot.starts_with("digraph G{\n"));
    assert!(dot.ends_with("}\n"));
    // The root label carries its index, parent sentinel, and depth.
    assert!(dot.contains("<FONT COLOR=\"RED\">0</FONT> (-1) {0}"));
    // One edge per non-root node.
    for child in 1..9 {
        assert!(dot.contains(&format!("    0 -> {child}")));
    }
    // Element ids are listed in blue.
    assert!(dot.contains("<FONT COLOR=\"BLUE\">0</FONT>"));

    // Display renders the same text.
    assert_eq!(tree.to_string(), dot);
}

#[test]
fn write_dot_creates_the_file() {
    let (vertices, elements) = single_tet();
    let mesh = TetMesh::new(&vertices, &elements);
    let tree = Octree::new(mesh, 1, 4).unwrap();

    let path = std::env::temp_dir().join("tetrafold_write_dot_test.dot");
    tree.write_dot(&path).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, tree.dot_string());
    let _ = std::fs::remove_file(&path);
}
