// crates/sn_export/tests/export_flow.rs

//! 端到端导出测试
//! 覆盖完整链路：图层 -> 合成 -> 序列化 -> 模板注入

use serde_json::json;
use sn_export::SwmmExporter;
use sn_foundation::LogLevel;
use sn_geo::projection::{IdentityProjection, LinearUnit};
use sn_layers::{
    Feature, FeatureCollection, Geometry, LayerData, LayerSet, LAYER_CATCH_BASINS,
    LAYER_DRAINAGE_AREAS, LAYER_PIPES,
};

fn feet() -> IdentityProjection {
    IdentityProjection::new(LinearUnit::Feet)
}

fn point(lon: f64, lat: f64, props: serde_json::Value) -> Feature {
    Feature::new(
        Some(Geometry::Point {
            coordinates: vec![lon, lat],
        }),
        props.as_object().cloned(),
    )
}

fn line(coords: Vec<Vec<f64>>, props: serde_json::Value) -> Feature {
    Feature::new(
        Some(Geometry::LineString {
            coordinates: coords,
        }),
        props.as_object().cloned(),
    )
}

fn polygon(ring: Vec<Vec<f64>>, props: serde_json::Value) -> Feature {
    Feature::new(
        Some(Geometry::Polygon {
            coordinates: vec![ring],
        }),
        props.as_object().cloned(),
    )
}

fn layer(name: &str, features: Vec<Feature>) -> LayerData {
    LayerData::new(name, FeatureCollection::new(features))
}

/// 提取某小节的正文行（跳过 ;; 注释头）
fn section_lines<'a>(content: &'a str, name: &str) -> Vec<&'a str> {
    let header = format!("[{name}]");
    content
        .lines()
        .skip_while(|l| l.trim() != header)
        .skip(1)
        .take_while(|l| !l.trim_start().starts_with('['))
        .filter(|l| !l.trim().is_empty() && !l.starts_with(";;"))
        .collect()
}

#[test]
fn coincident_catch_basins_merge_into_one_junction() {
    // 规格场景：两个 CB-1，投影相距 0.14 ft，一个 ground=100/invert=95，
    // 另一个 ground=98/invert=96 -> 单节点，ground=100，invert=95
    let layers = LayerSet::new(vec![layer(
        LAYER_CATCH_BASINS,
        vec![
            point(
                0.0,
                0.0,
                json!({ "Label": "CB-1", "Elevation Ground [ft]": 100.0, "Inv Out [ft]": 95.0 }),
            ),
            point(
                0.1,
                0.1,
                json!({ "Label": "CB-1", "Elevation Ground [ft]": 98.0, "Inv Out [ft]": 96.0 }),
            ),
        ],
    )]);

    let out = SwmmExporter::new("v1").export(&layers, &feet()).unwrap();
    let junctions = section_lines(&out.content, "JUNCTIONS");

    assert_eq!(junctions.len(), 1);
    // MaxDepth = 100 - 95 = 5
    assert_eq!(junctions[0], "CB-1\t100\t5\t0\t0\t0");
}

#[test]
fn pipe_resolves_endpoints_by_nearest_node() {
    // 规格场景：无流向描述、无标签匹配，(0,0)-(100,0) 的管线
    // 解析到两端节点，长度 100
    let layers = LayerSet::new(vec![
        layer(
            LAYER_CATCH_BASINS,
            vec![
                point(0.0, 0.0, json!({ "Label": "J-A" })),
                point(100.0, 0.0, json!({ "Label": "J-B" })),
            ],
        ),
        layer(
            LAYER_PIPES,
            vec![line(
                vec![vec![0.0, 0.0], vec![100.0, 0.0]],
                json!({ "Label": "P-1" }),
            )],
        ),
    ]);

    let out = SwmmExporter::new("v1").export(&layers, &feet()).unwrap();
    let conduits = section_lines(&out.content, "CONDUITS");

    assert_eq!(conduits.len(), 1);
    let tokens: Vec<&str> = conduits[0].split('\t').collect();
    assert_eq!(tokens[0], "P-1");
    assert_eq!(tokens[1], "J-A");
    assert_eq!(tokens[2], "J-B");
    assert_eq!(tokens[3], "100.000");

    // 断面与管段一一对应，缺省 12 in -> 1 ft
    let xsections = section_lines(&out.content, "XSECTIONS");
    assert_eq!(xsections, vec!["P-1\tCIRCULAR\t1\t0\t0\t0\t1"]);
}

#[test]
fn degenerate_ring_group_disappears_with_single_warning() {
    // 规格场景：唯一的环清理后只剩 2 个独立顶点 ->
    // 零 SUBCATCHMENTS 行、零 POLYGONS 行、恰好一条警告
    let layers = LayerSet::new(vec![layer(
        LAYER_DRAINAGE_AREAS,
        vec![polygon(
            vec![vec![0.0, 0.0], vec![5.0, 5.0], vec![0.0, 0.0]],
            json!({ "DA_NAME": "DA-BAD" }),
        )],
    )]);

    let out = SwmmExporter::new("v1").export(&layers, &feet()).unwrap();

    assert!(section_lines(&out.content, "SUBCATCHMENTS").is_empty());
    assert!(section_lines(&out.content, "POLYGONS").is_empty());
    assert_eq!(out.log.count(LogLevel::Warn), 1);
    assert!(out.log.entries[0].message.contains("DA-BAD"));
}

#[test]
fn outfall_nodes_routed_to_outfalls_section() {
    let layers = LayerSet::new(vec![layer(
        LAYER_CATCH_BASINS,
        vec![
            point(0.0, 0.0, json!({ "Label": "OF-1", "Inv Out [ft]": 88.0 })),
            point(
                50.0,
                0.0,
                json!({ "Label": "CB-1", "Elevation Ground [ft]": 100.0, "Inv Out [ft]": 95.0 }),
            ),
        ],
    )]);

    let out = SwmmExporter::new("v1").export(&layers, &feet()).unwrap();

    let outfalls = section_lines(&out.content, "OUTFALLS");
    assert_eq!(outfalls, vec!["OF-1\t88\tFREE\t\tNO\t"]);

    let junctions = section_lines(&out.content, "JUNCTIONS");
    assert_eq!(junctions.len(), 1);
    assert!(junctions[0].starts_with("CB-1\t"));

    // COORDINATES 包含全部节点
    let coords = section_lines(&out.content, "COORDINATES");
    assert_eq!(coords.len(), 2);
}

#[test]
fn full_network_export_is_byte_identical_across_runs() {
    let build_layers = || {
        LayerSet::new(vec![
            layer(
                LAYER_CATCH_BASINS,
                vec![
                    point(
                        0.0,
                        0.0,
                        json!({ "Label": "CB-1", "Elevation Ground [ft]": 100.0, "Inv Out [ft]": 95.0 }),
                    ),
                    point(
                        200.0,
                        0.0,
                        json!({ "Label": "OF-1", "Inv Out [ft]": 90.0 }),
                    ),
                ],
            ),
            layer(
                LAYER_PIPES,
                vec![line(
                    vec![vec![0.0, 0.0], vec![200.0, 0.0]],
                    json!({ "Label": "P-1", "Diameter [in]": 15, "Roughness": 0.013 }),
                )],
            ),
            layer(
                LAYER_DRAINAGE_AREAS,
                vec![polygon(
                    vec![
                        vec![0.0, 0.0],
                        vec![300.0, 0.0],
                        vec![300.0, 300.0],
                        vec![0.0, 300.0],
                        vec![0.0, 0.0],
                    ],
                    json!({ "DA_NAME": "DA-1" }),
                )],
            ),
        ])
    };

    let a = SwmmExporter::new("v1").export(&build_layers(), &feet()).unwrap();
    let b = SwmmExporter::new("v1").export(&build_layers(), &feet()).unwrap();

    assert_eq!(a.content, b.content);
    assert_eq!(a.filename, b.filename);
}

#[test]
fn map_block_covers_polygon_extent_with_padding() {
    let layers = LayerSet::new(vec![layer(
        LAYER_DRAINAGE_AREAS,
        vec![polygon(
            vec![
                vec![0.0, 0.0],
                vec![100.0, 0.0],
                vec![100.0, 200.0],
                vec![0.0, 200.0],
                vec![0.0, 0.0],
            ],
            json!({ "DA_NAME": "DA-1" }),
        )],
    )]);

    let out = SwmmExporter::new("v1").export(&layers, &feet()).unwrap();
    let map = section_lines(&out.content, "MAP");

    // 每轴 1% 外扩：x ∈ [-1, 101]，y ∈ [-2, 202]
    assert_eq!(map[0], "DIMENSIONS       -1 -2  101 202");
    assert_eq!(map[1], "UNITS            Feet");
}

#[test]
fn polygons_section_consistent_with_subcatchments() {
    // 一个正常分区 + 一个退化分区：POLYGONS 不含退化分区的顶点
    let layers = LayerSet::new(vec![layer(
        LAYER_DRAINAGE_AREAS,
        vec![
            polygon(
                vec![
                    vec![0.0, 0.0],
                    vec![50.0, 0.0],
                    vec![50.0, 50.0],
                    vec![0.0, 50.0],
                    vec![0.0, 0.0],
                ],
                json!({ "DA_NAME": "DA-OK" }),
            ),
            polygon(
                vec![vec![0.0, 0.0], vec![5.0, 5.0], vec![0.0, 0.0]],
                json!({ "DA_NAME": "DA-GONE" }),
            ),
        ],
    )]);

    let out = SwmmExporter::new("v1").export(&layers, &feet()).unwrap();

    let subcatch = section_lines(&out.content, "SUBCATCHMENTS");
    assert_eq!(subcatch.len(), 1);
    assert!(subcatch[0].starts_with("DA-OK\t"));

    let polygons = section_lines(&out.content, "POLYGONS");
    assert!(!polygons.is_empty());
    assert!(polygons.iter().all(|l| l.starts_with("DA-OK\t")));
}

#[test]
fn field_map_overrides_attribute_lookup() {
    let mut field_map = std::collections::HashMap::new();
    field_map.insert("label".to_string(), "STRUCT_ID".to_string());
    field_map.insert("ground".to_string(), "RIM_EL".to_string());
    field_map.insert("inv_out".to_string(), "INV_EL".to_string());

    let cb = layer(
        LAYER_CATCH_BASINS,
        vec![point(
            0.0,
            0.0,
            json!({ "STRUCT_ID": "MH-7", "RIM_EL": 120.0, "INV_EL": 112.5 }),
        )],
    )
    .with_field_map(field_map);

    let out = SwmmExporter::new("v1")
        .export(&LayerSet::new(vec![cb]), &feet())
        .unwrap();
    let junctions = section_lines(&out.content, "JUNCTIONS");

    assert_eq!(junctions, vec!["MH-7\t120\t7.5\t0\t0\t0"]);
}

#[test]
fn explicit_direction_string_orients_conduit() {
    let layers = LayerSet::new(vec![
        layer(
            LAYER_CATCH_BASINS,
            vec![
                point(0.0, 0.0, json!({ "Label": "CB-1" })),
                point(100.0, 0.0, json!({ "Label": "CB-2" })),
            ],
        ),
        layer(
            LAYER_PIPES,
            vec![line(
                vec![vec![0.0, 0.0], vec![100.0, 0.0]],
                json!({ "Label": "P-1", "Directions": "CB-2 to CB-1" }),
            )],
        ),
    ]);

    let out = SwmmExporter::new("v1").export(&layers, &feet()).unwrap();
    let conduits = section_lines(&out.content, "CONDUITS");
    let tokens: Vec<&str> = conduits[0].split('\t').collect();

    assert_eq!(tokens[1], "CB-2");
    assert_eq!(tokens[2], "CB-1");
}

#[test]
fn multi_ring_catchment_lists_largest_ring_first() {
    let layers = LayerSet::new(vec![layer(
        LAYER_DRAINAGE_AREAS,
        vec![
            polygon(
                vec![
                    vec![1000.0, 0.0],
                    vec![1010.0, 0.0],
                    vec![1010.0, 10.0],
                    vec![1000.0, 10.0],
                    vec![1000.0, 0.0],
                ],
                json!({ "DA_NAME": "DA-1" }),
            ),
            polygon(
                vec![
                    vec![0.0, 0.0],
                    vec![500.0, 0.0],
                    vec![500.0, 500.0],
                    vec![0.0, 500.0],
                    vec![0.0, 0.0],
                ],
                json!({ "DA_NAME": "DA-1" }),
            ),
        ],
    )]);

    let out = SwmmExporter::new("v1").export(&layers, &feet()).unwrap();
    let polygons = section_lines(&out.content, "POLYGONS");

    // 第一条顶点行属于大环（500x500），不是先上传的小环
    assert_eq!(polygons[0], "DA-1\t0\t0");
    assert_eq!(polygons[1], "DA-1\t500\t0");
}
