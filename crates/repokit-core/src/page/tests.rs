use super::*;
use crate::{
    error::ErrorClass,
    test_fixtures::{AuditTrail, Person, PersonFilter, people},
};
use proptest::prelude::*;
use repokit_derive::Record;

///
/// Row
///

#[derive(Clone, Debug, PartialEq, Record)]
struct Row {
    n: i64,
    label: String,
    tags: Vec<String>,
}

impl Row {
    fn new(n: i64, label: &str) -> Self {
        Self {
            n,
            label: label.to_string(),
            tags: Vec::new(),
        }
    }
}

fn token() -> CancellationToken {
    CancellationToken::new()
}

fn rows(count: i64) -> MemorySource<Row> {
    (0..count).map(|n| Row::new(n, "row")).collect()
}

fn numbers(page: &Page<Row>) -> Vec<i64> {
    page.content.iter().map(|row| row.n).collect()
}

#[test]
fn windows_twenty_five_rows() {
    let cache = MetadataCache::new();
    let pager = Pager::<Row>::new(&cache);

    let expected = [(0, 10, 0), (1, 10, 10), (2, 5, 20)];
    for (index, len, first) in expected {
        let page = pager
            .fetch(rows(25), &PageRequest::new(index, 10, "n"), &token())
            .unwrap();

        assert_eq!(page.len(), len);
        assert_eq!(page.content[0].n, first);
        assert_eq!(page.total_elements, 25);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.page_index, u64::try_from(index).unwrap());
    }
}

#[test]
fn sorts_both_directions() {
    let cache = MetadataCache::new();
    let pager = Pager::<Row>::new(&cache);
    let source = || MemorySource::from(vec![Row::new(3, "c"), Row::new(1, "a"), Row::new(2, "b")]);

    let asc = pager
        .fetch(source(), &PageRequest::new(0, 10, "n"), &token())
        .unwrap();
    assert_eq!(numbers(&asc), [1, 2, 3]);

    let desc = pager
        .fetch(source(), &PageRequest::new(0, 10, "n").descending(), &token())
        .unwrap();
    assert_eq!(numbers(&desc), [3, 2, 1]);
    assert_eq!(desc.sort_direction, SortDirection::Descending);
}

#[test]
fn ties_keep_source_order() {
    let cache = MetadataCache::new();
    let source = MemorySource::from(vec![
        Row::new(1, "first"),
        Row::new(0, "zero"),
        Row::new(1, "second"),
        Row::new(1, "third"),
    ]);

    let page = Pager::<Row>::new(&cache)
        .fetch(source, &PageRequest::new(0, 10, "n").descending(), &token())
        .unwrap();
    let labels: Vec<_> = page.content.iter().map(|row| row.label.as_str()).collect();

    assert_eq!(labels, ["first", "second", "third", "zero"]);
}

#[test]
fn empty_source_yields_empty_page() {
    let cache = MetadataCache::new();
    let pager = Pager::<Row>::new(&cache);

    for index in [0, 3, 1_000] {
        let page = pager
            .fetch(rows(0), &PageRequest::new(index, 10, "n"), &token())
            .unwrap();

        assert_eq!(page.total_elements, 0);
        assert_eq!(page.total_pages, 0);
        assert!(page.is_empty());
    }
}

#[test]
fn page_past_the_end_is_empty() {
    let cache = MetadataCache::new();
    let page = Pager::<Row>::new(&cache)
        .fetch(rows(25), &PageRequest::new(7, 10, "n"), &token())
        .unwrap();

    assert!(page.is_empty());
    assert_eq!(page.total_elements, 25);
}

#[test]
fn invalid_requests_are_rejected() {
    let cache = MetadataCache::new();
    let pager = Pager::<Row>::new(&cache);
    let fetch = |request: PageRequest| pager.fetch(rows(3), &request, &token()).unwrap_err();

    assert!(matches!(
        fetch(PageRequest::new(0, 0, "n")),
        RepoError::InvalidPageSize { size: 0 }
    ));
    assert!(matches!(
        fetch(PageRequest::new(0, -4, "n")),
        RepoError::InvalidPageSize { size: -4 }
    ));
    assert!(matches!(
        fetch(PageRequest::new(-1, 10, "n")),
        RepoError::InvalidPageIndex { index: -1 }
    ));
    assert!(matches!(
        fetch(PageRequest::new(0, 10, " ")),
        RepoError::InvalidArgument(_)
    ));
    assert!(matches!(
        fetch(PageRequest::new(i64::MAX, i64::MAX, "n")),
        RepoError::InvalidPageIndex { .. }
    ));

    let err = fetch(PageRequest::new(0, 0, "n"));
    assert_eq!(err.class(), ErrorClass::Input);
}

#[test]
fn page_size_cap_comes_from_config() {
    let cache = MetadataCache::new();
    let config = RepoConfig::from_toml_str("[page]\nmax_page_size = 5\n").unwrap();
    let pager = Pager::<Row>::with_config(&cache, &config);

    let err = pager
        .fetch(rows(10), &PageRequest::new(0, 6, "n"), &token())
        .unwrap_err();
    assert!(matches!(err, RepoError::InvalidPageSize { size: 6 }));

    let page = pager
        .fetch(rows(10), &PageRequest::new(1, 5, "n"), &token())
        .unwrap();
    assert_eq!(numbers(&page), [5, 6, 7, 8, 9]);
}

#[test]
fn unknown_or_ineligible_sort_field_is_not_found() {
    let cache = MetadataCache::new();
    let pager = Pager::<Row>::new(&cache);

    for field in ["missing", "tags"] {
        let err = pager
            .fetch(rows(3), &PageRequest::new(0, 10, field), &token())
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound { field: Some(_), .. }));
    }

    // a non-cacheable record has no entry at all
    let err = Pager::<AuditTrail>::new(&cache)
        .fetch(
            MemorySource::from(vec![AuditTrail::default()]),
            &PageRequest::new(0, 10, "id"),
            &token(),
        )
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound { field: None, .. }));
}

#[test]
fn predicate_filters_before_counting() {
    let cache = MetadataCache::new();
    let page = Pager::<Row>::new(&cache)
        .predicate(Predicate::new(|row: &Row| row.n % 2 == 0))
        .predicate(Predicate::new(|row: &Row| row.n < 10))
        .fetch(rows(25), &PageRequest::new(0, 3, "n").descending(), &token())
        .unwrap();

    assert_eq!(page.total_elements, 5);
    assert_eq!(page.total_pages, 1);
    assert_eq!(numbers(&page), [8, 6, 4]);
}

#[test]
fn filter_object_compiles_into_the_pager() {
    let cache = MetadataCache::new();
    let filter = PersonFilter {
        min_age: Some(30),
        ..PersonFilter::default()
    };

    let page = Pager::<Person>::new(&cache)
        .filter(&filter, &token())
        .unwrap()
        .fetch(
            MemorySource::from(people()),
            &PageRequest::new(0, 10, "age"),
            &token(),
        )
        .unwrap();
    let ages: Vec<_> = page.content.iter().map(|person| person.age).collect();

    assert_eq!(ages, [36, 41, 52]);
}

#[test]
fn projection_maps_content_only() {
    let cache = MetadataCache::new();
    let page = Pager::<Person>::new(&cache)
        .fetch_mapped(
            MemorySource::from(people()),
            &PageRequest::new(0, 2, "name"),
            &token(),
            |rows| rows.into_iter().map(|person| person.name).collect(),
        )
        .unwrap();

    assert_eq!(page.content, ["Ada", "Anika"]);
    assert_eq!(page.total_elements, 5);
    assert_eq!(page.total_pages, 2);
}

#[test]
fn page_serializes_with_snake_case_direction() {
    let page = Page {
        page_index: 0,
        page_size: 1,
        sort_field: "n".to_string(),
        sort_direction: SortDirection::Descending,
        total_elements: 1,
        total_pages: 1,
        content: vec![1_u8],
    };

    let json = serde_json::to_value(&page).unwrap();
    assert_eq!(json["sort_direction"], "descending");
    assert_eq!(json["content"][0], 1);
}

proptest! {
    #[test]
    fn every_row_lands_on_exactly_one_page(count in 0_i64..60, size in 1_i64..12) {
        let cache = MetadataCache::new();
        let pager = Pager::<Row>::new(&cache);
        let mut seen = Vec::new();

        let mut index = 0;
        loop {
            let page = pager
                .fetch(rows(count), &PageRequest::new(index, size, "n"), &token())
                .unwrap();
            prop_assert_eq!(page.total_pages, u64::try_from(count / size).unwrap());
            prop_assert!(page.len() <= usize::try_from(size).unwrap());

            if page.is_empty() {
                break;
            }
            seen.extend(numbers(&page));
            index += 1;
        }

        prop_assert_eq!(seen, (0..count).collect::<Vec<_>>());
    }
}
