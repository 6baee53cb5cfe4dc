use binary_mesher::{
    chains, dense_to_grid, links, mesh_grid, Chain, MeshError, MeshSettings, OccupancyGrid,
};

#[test]
fn rejects_unsupported_diameters() {
    for diameter in [0, 3, 12, 48, 64] {
        assert_eq!(
            OccupancyGrid::new(diameter),
            Err(MeshError::InvalidDimension { diameter, max: 32 }),
            "diameter {} should be rejected",
            diameter
        );
    }
}

#[test]
fn rejects_wide_dense_input_instead_of_truncating() {
    let codes = vec![1u8; 64 * 64 * 64];
    let err = dense_to_grid(64, &codes).unwrap_err();

    assert!(matches!(err, MeshError::InvalidDimension { diameter: 64, .. }));
}

#[test]
fn empty_input_is_not_an_error() {
    let codes = vec![0u8; 8 * 8 * 8];
    let grid = dense_to_grid(8, &codes).unwrap();

    let mesh = mesh_grid(&grid, &MeshSettings::default()).unwrap();

    assert!(mesh.positions.is_empty());
    assert!(mesh.normals.is_empty());
    assert!(mesh.indices.is_empty());
}

#[test]
fn chain_round_trip_on_byte() {
    let seq = 0b0110_0110;
    let found: Vec<Chain> = chains(seq).collect();

    assert_eq!(
        found,
        vec![
            Chain { bitmask: 0b0000_0110, offset: 1, length: 2 },
            Chain { bitmask: 0b0110_0000, offset: 5, length: 2 },
        ]
    );
    assert_eq!(found.iter().fold(0, |acc, c| acc | c.bitmask), seq);
    assert_eq!(found[0].bitmask & found[1].bitmask, 0);
}

#[test]
fn links_of_two_bit_run() {
    let l = links(0b0110);

    assert_eq!(l.positive, 0b0100);
    assert_eq!(l.negative, 0b0010);
}
