use dress_customizer::design::DEFAULT_DESIGN_NAME;
use dress_customizer::export::render_svg;
use dress_customizer::{
    Configurable, DesignStore, DressParameters, ExportFormat, ExportOutput, Exporter,
    MemoryDesignStore, Neckline, SizePx, Studio, StudioProfile, generate_dress,
};
use image::RgbaImage;

/// Bounding box of pixels with alpha above half, as `(x0, y0, x1, y1)`.
fn opaque_bounds(img: &RgbaImage) -> (u32, u32, u32, u32) {
    let mut bounds = (u32::MAX, u32::MAX, 0, 0);
    for (x, y, px) in img.enumerate_pixels() {
        if px[3] > 128 {
            bounds.0 = bounds.0.min(x);
            bounds.1 = bounds.1.min(y);
            bounds.2 = bounds.2.max(x + 1);
            bounds.3 = bounds.3.max(y + 1);
        }
    }
    bounds
}

#[test]
fn full_size_export_is_the_thumbnail_scaled_up() {
    let svg = generate_dress(&DressParameters::default()).to_svg();
    let thumb = render_svg(&svg, SizePx::THUMBNAIL).unwrap();
    let full = render_svg(&svg, SizePx::FULL).unwrap();

    let (t, f) = (opaque_bounds(&thumb), opaque_bounds(&full));
    let scale = (SizePx::FULL.width / SizePx::THUMBNAIL.width) as i64;
    for (small, large) in [(t.0, f.0), (t.1, f.1), (t.2, f.2), (t.3, f.3)] {
        let diff = (small as i64 * scale - large as i64).abs();
        assert!(diff <= 2 * scale, "{t:?} vs {f:?}");
    }

    let aspect = |b: (u32, u32, u32, u32)| (b.2 - b.0) as f64 / (b.3 - b.1) as f64;
    assert!((aspect(t) - aspect(f)).abs() < 0.03);
}

#[test]
fn png_decodes_at_requested_size() {
    let svg = generate_dress(&DressParameters::default()).to_svg();
    let out = Exporter.export(&svg, ExportFormat::Png(SizePx::new(100, 140))).unwrap();
    let img = image::load_from_memory(out.as_bytes()).unwrap();
    assert_eq!((img.width(), img.height()), (100, 140));
}

#[test]
fn exporter_is_shareable_across_threads() {
    let svg = generate_dress(&DressParameters::default()).to_svg();
    let exporter = Exporter;
    let outputs: Vec<ExportOutput> = std::thread::scope(|s| {
        let handles: Vec<_> = [40u32, 80]
            .into_iter()
            .map(|w| {
                let svg = &svg;
                s.spawn(move || {
                    exporter
                        .export(svg, ExportFormat::Png(SizePx::new(w, w * 7 / 5)))
                        .unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(outputs.len(), 2);
    assert_ne!(outputs[0], outputs[1]);
}

#[test]
fn store_round_trip_through_studio() {
    let mut store = MemoryDesignStore::new();
    let mut studio = Studio::new();
    studio.set_params(DressParameters::default().with_neckline(Neckline::Halter));
    let first = studio.save_design(&mut store).unwrap();

    studio.set_prompt("gold satin sheath");
    studio.generate();
    let second = studio.save_design(&mut store).unwrap();

    let listed: Vec<_> = store.list().into_iter().map(|d| d.id).collect();
    assert_eq!(listed, vec![second.clone(), first.clone()]);

    let saved = store.get(&first).unwrap();
    assert_eq!(saved.name, DEFAULT_DESIGN_NAME);
    assert_eq!(saved.render().to_svg(), saved.svg);
    assert!(saved.thumbnail.starts_with("data:image/png;base64,"));

    let mut reopened = Studio::new();
    reopened.open_design(&store, &second).unwrap();
    assert_eq!(reopened.params().color, "#EAB308");
    assert_eq!(reopened.prompt(), "gold satin sheath");

    store.delete(&first).unwrap();
    assert!(store.get(&first).is_err());
}

#[test]
fn profile_json_drives_a_studio() {
    let json = r##"{
        "dress": {"color": "#111827", "pattern": "stripes", "neckline": "boat"},
        "export": {"thumbnail": {"width": 50, "height": 70}, "variantLimit": 1}
    }"##;
    let profile = StudioProfile::from_json(json).unwrap();

    let mut studio = Studio::new();
    studio.apply_profile(&profile);
    studio.save_variant().unwrap();
    studio.save_variant().unwrap();
    assert_eq!(studio.variants().len(), 1);
    assert_eq!(studio.params().neckline, Neckline::Boat);
}

#[test]
fn odd_colour_text_still_exports() {
    let params = DressParameters {
        color: r#"a<b" onload="x"#.to_string(),
        ..DressParameters::default()
    };
    let svg = generate_dress(&params).to_svg();
    assert!(!svg.contains(r#"onload="x""#));
    assert!(Exporter.export(&svg, ExportFormat::Png(SizePx::THUMBNAIL)).is_ok());
}
