use anyhow::Result;
use bookmark_core::Bookmark;
use bookmark_core::Category;
use bookmark_core::Folders;
use bookmark_core::service::BookmarkStoreBox;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::Event;

fn load_bookmarks(store: &BookmarkStoreBox, event_tx: &mpsc::UnboundedSender<Event>) -> Result<()> {
    match store.list(0, 0) {
        Ok(bookmarks) => {
            tracing::debug!(count = bookmarks.len(), "loaded bookmarks");
            event_tx.send(Event::BookmarksLoaded(bookmarks))?;
        }
        Err(err) => {
            event_tx.send(Event::ActionFailed(format!(
                "Failed to load bookmarks: {err}"
            )))?;
        }
    }

    return Ok(());
}

fn delete_bookmark(
    store: &BookmarkStoreBox,
    bookmark: Bookmark,
    event_tx: &mpsc::UnboundedSender<Event>,
) -> Result<()> {
    match store.delete(&bookmark) {
        Ok(()) => {
            tracing::info!(id = bookmark.id, folder = %bookmark.folder, "deleted bookmark");
            event_tx.send(Event::BookmarkDeleted(bookmark))?;
        }
        Err(err) => {
            tracing::error!(id = bookmark.id, error = %err, "delete failed");
            event_tx.send(Event::ActionFailed(format!("Error deleting bookmark: {err}")))?;
        }
    }

    return Ok(());
}

fn update_category(
    store: &BookmarkStoreBox,
    mut bookmark: Bookmark,
    category: Category,
    event_tx: &mpsc::UnboundedSender<Event>,
) -> Result<()> {
    bookmark.category = category;

    match store.save(&mut bookmark) {
        Ok(()) => {
            tracing::info!(
                id = bookmark.id,
                category = bookmark.category.as_str(),
                "updated category"
            );
            event_tx.send(Event::BookmarkUpdated(bookmark))?;
        }
        Err(err) => {
            event_tx.send(Event::ActionFailed(format!("Error updating bookmark: {err}")))?;
        }
    }

    return Ok(());
}

fn open_folder(
    folders: &Folders,
    folder: String,
    event_tx: &mpsc::UnboundedSender<Event>,
) -> Result<()> {
    match folders.open_in_file_manager(&folder) {
        Ok(()) => event_tx.send(Event::FolderOpened(folder))?,
        Err(err) => event_tx.send(Event::ActionFailed(format!("Error opening folder: {err}")))?,
    }

    return Ok(());
}

pub struct ActionsService {}

impl ActionsService {
    /// Loads the bookmark set, then serves actions until the sender side closes.
    pub async fn start(
        store: BookmarkStoreBox,
        folders: Folders,
        event_tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        load_bookmarks(&store, &event_tx)?;

        while let Some(action) = rx.recv().await {
            match action {
                Action::LoadBookmarks => {
                    load_bookmarks(&store, &event_tx)?;
                }
                Action::DeleteBookmark(bookmark) => {
                    delete_bookmark(&store, bookmark, &event_tx)?;
                }
                Action::UpdateCategory(bookmark, category) => {
                    update_category(&store, bookmark, category, &event_tx)?;
                }
                Action::OpenFolder(folder) => {
                    open_folder(&folders, folder, &event_tx)?;
                }
                Action::WriteCwdFile(file, folder) => match folders.write_cwd_file(&file, &folder) {
                    Ok(()) => event_tx.send(Event::CwdFileWritten(folder))?,
                    Err(err) => event_tx.send(Event::ActionFailed(format!(
                        "Error writing {}: {err}",
                        file.display()
                    )))?,
                },
            }
        }

        return Ok(());
    }
}

#[cfg(test)]
mod tests {
    use bookmark_core::App;
    use tempfile::tempdir;

    use super::*;

    fn seeded_store() -> Result<BookmarkStoreBox> {
        let app = App::in_memory()?;
        for (folder, category) in [("/work/api", "work"), ("/home/notes", "")] {
            let mut bookmark = Bookmark::new(folder, category);
            app.store().save(&mut bookmark)?;
        }

        return Ok(app.into_store());
    }

    fn spawn_service(
        store: BookmarkStoreBox,
        folders: Folders,
    ) -> (
        mpsc::UnboundedSender<Action>,
        mpsc::UnboundedReceiver<Event>,
    ) {
        let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();
        let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

        tokio::spawn(async move {
            ActionsService::start(store, folders, event_tx, &mut action_rx)
                .await
                .unwrap();
        });

        return (action_tx, event_rx);
    }

    async fn next_loaded(event_rx: &mut mpsc::UnboundedReceiver<Event>) -> Vec<Bookmark> {
        match event_rx.recv().await {
            Some(Event::BookmarksLoaded(bookmarks)) => return bookmarks,
            other => panic!("expected BookmarksLoaded, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn it_loads_bookmarks_on_start() -> Result<()> {
        let (_action_tx, mut event_rx) = spawn_service(seeded_store()?, Folders::default());

        let bookmarks = next_loaded(&mut event_rx).await;
        assert_eq!(bookmarks.len(), 2);

        return Ok(());
    }

    #[tokio::test]
    async fn it_deletes_then_reloads_without_the_bookmark() -> Result<()> {
        let (action_tx, mut event_rx) = spawn_service(seeded_store()?, Folders::default());
        let bookmarks = next_loaded(&mut event_rx).await;
        let target = bookmarks
            .iter()
            .find(|b| b.folder == "/work/api")
            .cloned()
            .unwrap();

        action_tx.send(Action::DeleteBookmark(target.clone()))?;
        match event_rx.recv().await {
            Some(Event::BookmarkDeleted(deleted)) => assert_eq!(deleted.id, target.id),
            other => panic!("expected BookmarkDeleted, got {other:?}"),
        }

        action_tx.send(Action::LoadBookmarks)?;
        let bookmarks = next_loaded(&mut event_rx).await;
        assert_eq!(bookmarks.len(), 1);
        assert_eq!(bookmarks[0].folder, "/home/notes");

        return Ok(());
    }

    #[tokio::test]
    async fn it_reports_failed_deletes() -> Result<()> {
        let (action_tx, mut event_rx) = spawn_service(seeded_store()?, Folders::default());
        next_loaded(&mut event_rx).await;

        action_tx.send(Action::DeleteBookmark(Bookmark::new("/never/saved", "")))?;
        match event_rx.recv().await {
            Some(Event::ActionFailed(message)) => {
                assert!(message.starts_with("Error deleting bookmark"))
            }
            other => panic!("expected ActionFailed, got {other:?}"),
        }

        return Ok(());
    }

    #[tokio::test]
    async fn it_updates_categories() -> Result<()> {
        let (action_tx, mut event_rx) = spawn_service(seeded_store()?, Folders::default());
        let bookmarks = next_loaded(&mut event_rx).await;
        let target = bookmarks
            .iter()
            .find(|b| b.folder == "/home/notes")
            .cloned()
            .unwrap();

        action_tx.send(Action::UpdateCategory(target, Category::new("personal")))?;
        match event_rx.recv().await {
            Some(Event::BookmarkUpdated(updated)) => {
                assert_eq!(updated.category, Category::new("personal"))
            }
            other => panic!("expected BookmarkUpdated, got {other:?}"),
        }

        return Ok(());
    }

    #[tokio::test]
    async fn it_writes_the_cwd_file() -> Result<()> {
        let dir = tempdir()?;
        let cwd_file = dir.path().join("cwd");
        let (action_tx, mut event_rx) = spawn_service(seeded_store()?, Folders::default());
        next_loaded(&mut event_rx).await;

        action_tx.send(Action::WriteCwdFile(cwd_file.clone(), "/work/api".to_string()))?;
        match event_rx.recv().await {
            Some(Event::CwdFileWritten(folder)) => assert_eq!(folder, "/work/api"),
            other => panic!("expected CwdFileWritten, got {other:?}"),
        }
        assert_eq!(std::fs::read_to_string(cwd_file)?, "/work/api");

        return Ok(());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn it_reports_opener_failures() -> Result<()> {
        let (action_tx, mut event_rx) =
            spawn_service(seeded_store()?, Folders::with_opener("false"));
        next_loaded(&mut event_rx).await;

        action_tx.send(Action::OpenFolder("/work/api".to_string()))?;
        match event_rx.recv().await {
            Some(Event::ActionFailed(message)) => {
                assert!(message.starts_with("Error opening folder"))
            }
            other => panic!("expected ActionFailed, got {other:?}"),
        }

        return Ok(());
    }
}
