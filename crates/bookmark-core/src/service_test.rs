use chrono::Duration;
use chrono::TimeZone;
use chrono::Utc;

use super::*;

fn store() -> SqliteBookmarks {
    SqliteBookmarks::new(Database::open_in_memory().unwrap())
}

fn saved(store: &SqliteBookmarks, folder: &str, category: &str, minutes: i64) -> Bookmark {
    let mut bookmark = Bookmark::new(folder, category);
    bookmark.date_created =
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap() + Duration::minutes(minutes);
    store.save(&mut bookmark).unwrap();
    bookmark
}

fn folders(bookmarks: &[Bookmark]) -> Vec<&str> {
    bookmarks.iter().map(|b| b.folder.as_str()).collect()
}

#[test]
fn it_assigns_id_and_creation_date_on_insert() {
    let store = store();
    let mut bookmark = Bookmark::new("/test/work/project1", "work");

    let before = Utc::now();
    store.save(&mut bookmark).unwrap();

    assert!(bookmark.id > 0);
    assert!(bookmark.date_created >= before - Duration::seconds(1));

    let loaded = store.get_by_id(bookmark.id).unwrap();
    assert_eq!(loaded.folder, "/test/work/project1");
    assert_eq!(loaded.category, Category::new("work"));
}

#[test]
fn it_refuses_to_save_without_folder() {
    let store = store();
    let mut bookmark = Bookmark::new("", "work");

    assert!(matches!(
        store.save(&mut bookmark),
        Err(BookmarkError::Validation(_))
    ));
    assert!(store.list(0, 0).unwrap().is_empty());
}

#[test]
fn it_updates_existing_rows() {
    let store = store();
    let mut bookmark = saved(&store, "/test/temp", "", 0);

    bookmark.category = Category::new("archive");
    store.save(&mut bookmark).unwrap();

    let all = store.list(0, 0).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].category, Category::new("archive"));
}

#[test]
fn it_lists_newest_first_with_limit_and_offset() {
    let store = store();
    saved(&store, "/a", "work", 0);
    saved(&store, "/b", "work", 1);
    saved(&store, "/c", "personal", 2);
    saved(&store, "/d", "", 3);

    assert_eq!(folders(&store.list(0, 0).unwrap()), vec!["/d", "/c", "/b", "/a"]);
    assert_eq!(folders(&store.list(2, 0).unwrap()), vec!["/d", "/c"]);
    assert_eq!(folders(&store.list(2, 1).unwrap()), vec!["/c", "/b"]);
    assert_eq!(folders(&store.list(0, 3).unwrap()), vec!["/a"]);
}

#[test]
fn it_searches_by_exact_category() {
    let store = store();
    saved(&store, "/test/work/project1", "work", 0);
    saved(&store, "/test/work/project2", "work-old", 1);
    saved(&store, "/test/personal/docs", "personal", 2);

    let work = store.search_by_category(&Category::new("work")).unwrap();
    assert_eq!(folders(&work), vec!["/test/work/project1"]);

    let none = store.search_by_category(&Category::new("")).unwrap();
    assert!(none.is_empty());
}

#[test]
fn it_searches_by_folder_substring_literally() {
    let store = store();
    saved(&store, "/test/temp", "test", 0);
    saved(&store, "/test/100%_done", "", 1);
    saved(&store, "/test/1000 done", "", 2);

    assert_eq!(folders(&store.search_by_folder("temp").unwrap()), vec!["/test/temp"]);
    assert_eq!(
        folders(&store.search_by_folder("%_").unwrap()),
        vec!["/test/100%_done"]
    );
    assert_eq!(store.search_by_folder("/test").unwrap().len(), 3);
}

#[test]
fn it_soft_deletes() {
    let store = store();
    let work = saved(&store, "/test/work/project1", "work", 0);
    saved(&store, "/test/personal/docs", "personal", 1);

    store.delete(&work).unwrap();

    assert_eq!(folders(&store.list(0, 0).unwrap()), vec!["/test/personal/docs"]);
    assert!(store.search_by_category(&Category::new("work")).unwrap().is_empty());
    assert!(store.search_by_folder("project1").unwrap().is_empty());
    assert_eq!(
        store.get_by_id(work.id).unwrap_err(),
        BookmarkError::NotFound(work.id)
    );

    let raw_rows: i64 = store
        .database()
        .connection()
        .query_row("SELECT COUNT(*) FROM bookmarks", [], |row| row.get(0))
        .unwrap();
    assert_eq!(raw_rows, 2);
}

#[test]
fn it_rejects_deleting_unsaved_or_deleted_rows() {
    let store = store();

    assert_eq!(
        store.delete(&Bookmark::new("/x", "")).unwrap_err(),
        BookmarkError::MissingId
    );

    let bookmark = saved(&store, "/x", "", 0);
    store.delete(&bookmark).unwrap();
    assert_eq!(
        store.delete(&bookmark).unwrap_err(),
        BookmarkError::NotFound(bookmark.id)
    );
}

#[test]
fn it_lists_distinct_live_categories() {
    let store = store();
    saved(&store, "/a", "work", 0);
    saved(&store, "/b", "work", 1);
    saved(&store, "/c", "", 2);
    let gone = saved(&store, "/d", "archive", 3);
    store.delete(&gone).unwrap();

    assert_eq!(
        store.categories().unwrap(),
        vec![Category::new(""), Category::new("work")]
    );
}

#[test]
fn it_escapes_like_wildcards() {
    assert_eq!(escape_like("a%b_c\\d"), "a\\%b\\_c\\\\d");
    assert_eq!(escape_like("plain"), "plain");
}
