//! Integration tests for the full structuring pipeline.
//!
//! A small but realistic ebook is pushed through structuring, alignment and
//! render preparation, and the JSON contract of each artifact is checked.

use folio_oxide::converters::RenderItem;
use folio_oxide::layout::{aligned_layout_from_json, FeatureKind, LayoutType};
use folio_oxide::model::{ImagePlan, ImageSlot, PageImages, PageText};
use folio_oxide::pipeline::{from_json, to_json, StructurePipeline};
use folio_oxide::structure::{build_toc_entries, derive_document_title, StructuredDocument};
use folio_oxide::{Error, StructureConfig};

// ============================================================================
// Fixtures
// ============================================================================

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn ebook_pages() -> Vec<PageText> {
    vec![
        PageText::new(1, "Chess Basics.\n\nA practical guide for adult improvers."),
        PageText::new(
            2,
            "Table of Contents\n\nChapter 1: Opening Principles ..... 3\n\nChapter 2: Tactical Patterns ..... 5",
        ),
        PageText::new(
            3,
            "Chapter 1: Opening Principles\n\nWhen you sit down at the board, think about development.\n\n\
             • Control the center\n\n• Develop knights before bishops",
        ),
        PageText::new(
            4,
            "Mistake 1: Moving the queen early.\n\nThe queen gets chased and you lose valuable time.",
        ),
        PageText::new(
            5,
            "Chapter 2: Tactical Patterns\n\nWhen pieces line up, look for tactics.\n\n\
             Forks And Double Attacks:\n\nA knight fork hits two pieces at once.",
        ),
        PageText::new(
            6,
            "Forks And Double Attacks In Practice:\n\nPractice these patterns daily with puzzles.",
        ),
    ]
}

fn image_plan() -> ImagePlan {
    ImagePlan {
        pages: vec![
            PageImages {
                page_number: 1,
                images: vec![ImageSlot::planned("p1_cover", 1, "left")],
            },
            PageImages {
                page_number: 3,
                images: vec![
                    ImageSlot::planned("p3_board", 3, "right-top"),
                    ImageSlot::planned("p3_extra", 3, "left"),
                ],
            },
        ],
    }
}

// ============================================================================
// Structure
// ============================================================================

#[test]
fn test_hierarchy_of_sample_ebook() {
    init_logging();
    let doc = StructurePipeline::new()
        .structure(&ebook_pages(), "Chess Basics")
        .unwrap();

    let page_numbers: Vec<u32> = doc.pages.iter().map(|p| p.page_number).collect();
    assert_eq!(page_numbers, vec![1, 3, 4, 5, 6]);

    let chapters: Vec<(&str, &str, u32, u32)> = doc
        .chapters
        .iter()
        .map(|c| (c.id.as_str(), c.title.as_str(), c.start_page, c.end_page))
        .collect();
    assert_eq!(
        chapters,
        vec![
            ("chapter_1", "Chapter 1: Opening Principles", 3, 4),
            ("chapter_2", "Chapter 2: Tactical Patterns", 5, 6),
        ]
    );

    let sections: Vec<(&str, u8, u32, u32)> = doc
        .sections
        .iter()
        .map(|s| (s.id.as_str(), s.level, s.start_page, s.end_page))
        .collect();
    assert_eq!(
        sections,
        vec![("section_1", 2, 3, 4), ("section_2", 2, 5, 5), ("section_3", 2, 6, 6)]
    );
    assert_eq!(doc.sections[2].title, "Forks And Double Attacks In Practice:");

    let front = &doc.pages[0];
    assert!(front.is_front_matter());
    assert_eq!(front.section_id, "section_0");
    assert_eq!(front.heading, None);

    let chapter_page = &doc.pages[1];
    assert_eq!(
        chapter_page.content_blocks,
        vec!["• Control the center".to_string(), "• Develop knights before bishops".to_string()]
    );
    assert_eq!(doc.pages[3].content_blocks[0], "Forks And Double Attacks:");
}

#[test]
fn test_document_lookups() {
    let doc = StructurePipeline::new()
        .structure(&ebook_pages(), "Chess Basics")
        .unwrap();

    let chapter = doc.chapter("chapter_2").unwrap();
    assert_eq!(chapter.title, "Chapter 2: Tactical Patterns");
    assert_eq!(chapter.page_count(), 2);
    assert!(doc.chapter("chapter_3").is_none());
    assert!(doc.chapter("front_matter").is_none());

    let section = doc.section("section_3").unwrap();
    assert_eq!(section.start_page, 6);
    assert!(doc.section("section_0").is_none());

    let pages: Vec<u32> = doc.pages_in_chapter("chapter_1").map(|p| p.page_number).collect();
    assert_eq!(pages, vec![3, 4]);
    let front: Vec<u32> = doc.pages_in_chapter("front_matter").map(|p| p.page_number).collect();
    assert_eq!(front, vec![1]);
}

#[test]
fn test_structured_document_json_contract() {
    let doc = StructurePipeline::new()
        .structure(&ebook_pages(), "Chess Basics")
        .unwrap();
    let json = serde_json::to_value(&doc).unwrap();

    assert_eq!(json["document_title"], "Chess Basics");
    assert_eq!(json["chapters"][0]["id"], "chapter_1");
    assert_eq!(json["chapters"][0]["level"], 1);
    assert_eq!(json["pages"][0]["chapter_id"], "front_matter");
    assert!(json["pages"][0]["heading"].is_null());
    assert_eq!(json["pages"][0]["heading_level"], 0);
    assert!(json["pages"][0]["raw_text"].as_str().unwrap().starts_with("Chess Basics."));

    let back: StructuredDocument = from_json(&to_json(&doc).unwrap()).unwrap();
    assert_eq!(back, doc);
}

#[test]
fn test_toc_entries_from_detected_chapters() {
    let doc = StructurePipeline::new()
        .structure(&ebook_pages(), "Chess Basics")
        .unwrap();
    let entries = build_toc_entries(&doc.chapters, &doc.document_title);
    let titles: Vec<&str> = entries.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Chapter 1: Opening Principles", "Chapter 2: Tactical Patterns"]);
}

#[test]
fn test_title_derivation_feeds_pipeline() {
    let pages = ebook_pages();
    let title = derive_document_title(None, &pages, Some("ebook_01_chess"));
    assert_eq!(title, "Chess Basics.");
    assert!(StructurePipeline::new().structure(&pages, &title).is_ok());
}

// ============================================================================
// Alignment
// ============================================================================

#[test]
fn test_alignment_of_sample_ebook() {
    init_logging();
    let pipeline = StructurePipeline::new();
    let doc = pipeline.structure(&ebook_pages(), "Chess Basics").unwrap();
    let layout = pipeline.align(&doc, &image_plan()).unwrap();

    let layouts: Vec<(u32, LayoutType)> = layout
        .pages
        .iter()
        .map(|p| (p.page_number, p.layout_type))
        .collect();
    assert_eq!(
        layouts,
        vec![
            (1, LayoutType::ImageLeftTextRight),
            (3, LayoutType::ImageRightTextLeft),
            (4, LayoutType::FullWidthText),
            (5, LayoutType::FullWidthText),
            (6, LayoutType::FullWidthText),
        ]
    );
    assert!(layout.pages.iter().all(|p| p.images.len() <= 1));
    assert_eq!(layout.pages[1].images[0].slot_id, "p3_board");
    assert_eq!(layout.pages[1].heading, "Chapter 1: Opening Principles");
    assert_eq!(layout.pages[0].heading, "");

    let json = to_json(&layout).unwrap();
    assert!(json.contains("\"layout_type\": \"image_right_text_left\""));
    assert_eq!(aligned_layout_from_json(&json).unwrap(), layout);
}

#[test]
fn test_unknown_layout_type_rejected() {
    let json = r#"{"pages": [{"page_number": 1, "heading": "", "heading_level": 0,
        "body_blocks": [], "layout_type": "two_column", "images": []}]}"#;
    match aligned_layout_from_json(json) {
        Err(Error::InvalidLayoutType(value)) => assert_eq!(value, "two_column"),
        other => panic!("expected InvalidLayoutType, got {:?}", other),
    }
}

// ============================================================================
// Render plan
// ============================================================================

#[test]
fn test_render_plan_of_sample_ebook() {
    init_logging();
    let output = StructurePipeline::new()
        .run(&ebook_pages(), "Chess Basics", &image_plan())
        .unwrap();
    let plan = &output.render_plan;

    assert!(matches!(plan.items[0], RenderItem::TableOfContents { .. }));
    assert_eq!(plan.chapter_count(), 2);

    let features: Vec<FeatureKind> = plan
        .items
        .iter()
        .filter_map(|item| match item {
            RenderItem::Feature(block) => Some(block.kind),
            _ => None,
        })
        .collect();
    assert_eq!(
        features,
        vec![FeatureKind::Mistake, FeatureKind::Summary, FeatureKind::Summary]
    );
    assert!(matches!(
        plan.items.last(),
        Some(RenderItem::Feature(block)) if block.kind == FeatureKind::Summary
    ));

    let figures = plan
        .items
        .iter()
        .filter(|item| matches!(item, RenderItem::Figure { .. }))
        .count();
    assert_eq!(figures, 2);
}

// ============================================================================
// Errors and configuration
// ============================================================================

#[test]
fn test_missing_title_and_empty_document() {
    let pipeline = StructurePipeline::new();
    assert!(matches!(
        pipeline.run(&ebook_pages(), "", &ImagePlan::default()),
        Err(Error::MissingTitle)
    ));
    assert!(matches!(
        pipeline.run(&[PageText::new(1, "Table of Contents")], "Title", &ImagePlan::default()),
        Err(Error::EmptyDocument)
    ));
}

#[test]
fn test_deeper_section_scan() {
    let pages = vec![PageText::new(
        1,
        "first plain block ends here.\n\nsecond plain block ends here.\n\n\
         third plain block ends here.\n\nLate Section Heading Here:\n\nbody text follows it.",
    )];
    let shallow = StructurePipeline::new().structure(&pages, "T").unwrap();
    assert!(shallow.sections.is_empty());

    let deep = StructurePipeline::with_config(StructureConfig::new().with_section_scan_depth(4))
        .structure(&pages, "T")
        .unwrap();
    assert_eq!(deep.sections.len(), 1);
    assert_eq!(deep.sections[0].title, "Late Section Heading Here:");
}
