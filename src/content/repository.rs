//! Post repository - loads posts from a `<posts_root>/<slug>/<slug>.mdx` tree

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use super::{ContentError, FrontMatter, Post, PostSummary};

/// File-system backed post repository.
///
/// Every call reads fresh from disk; the repository holds no cache and
/// never writes. Safe to share across threads.
#[derive(Debug, Clone)]
pub struct PostRepository {
    posts_root: PathBuf,
}

impl PostRepository {
    /// Create a repository rooted at the given posts directory
    pub fn new<P: Into<PathBuf>>(posts_root: P) -> Self {
        Self {
            posts_root: posts_root.into(),
        }
    }

    pub fn posts_root(&self) -> &Path {
        &self.posts_root
    }

    /// List the slug of every post directory, sorted by name.
    ///
    /// Each directory must contain exactly one `.mdx` file; zero or more
    /// than one fails with [`ContentError::AmbiguousContent`] rather than
    /// silently picking the first match. Stray files in the posts root
    /// are ignored.
    pub fn list_slugs(&self) -> Result<Vec<String>, ContentError> {
        if !self.posts_root.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.posts_root).map_err(|source| ContentError::Io {
            path: self.posts_root.clone(),
            source,
        })?;

        let mut dirs: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_dir())
            .collect();
        dirs.sort();

        dirs.iter().map(|dir| single_mdx_basename(dir)).collect()
    }

    /// Load a single post by slug.
    ///
    /// Reads `<posts_root>/<slug>/<slug>.mdx` and splits it into
    /// front-matter and body. A missing file is [`ContentError::NotFound`];
    /// a malformed front-matter block is [`ContentError::Parse`].
    pub fn get_post(&self, slug: &str) -> Result<Post, ContentError> {
        let path = self.posts_root.join(slug).join(format!("{slug}.mdx"));
        if !path.is_file() {
            return Err(ContentError::NotFound {
                slug: slug.to_string(),
            });
        }

        let document = fs::read_to_string(&path).map_err(|source| ContentError::Io {
            path: path.clone(),
            source,
        })?;

        let (meta, body) = FrontMatter::parse(&document)
            .map_err(|source| ContentError::Parse { path, source })?;

        Ok(Post {
            meta,
            slug: slug.to_string(),
            content: body.to_string(),
        })
    }

    /// Load all posts, newest first.
    ///
    /// A post that fails to load is logged and skipped so it cannot take
    /// down the rest of the listing. Posts with no parseable date sort
    /// last; ties keep slug order (the sort is stable).
    pub fn list_posts(&self) -> Result<Vec<Post>, ContentError> {
        let mut posts = Vec::new();
        for slug in self.list_slugs()? {
            match self.get_post(&slug) {
                Ok(post) => posts.push(post),
                Err(e) => tracing::warn!("skipping post '{}': {:#}", slug, e),
            }
        }

        posts.sort_by(|a, b| compare_dates_desc(a.date(), b.date()));
        Ok(posts)
    }

    /// The summary projection of [`Self::list_posts`]
    pub fn list_summaries(&self) -> Result<Vec<PostSummary>, ContentError> {
        Ok(self.list_posts()?.iter().map(Post::summary).collect())
    }
}

/// Three-way comparator for newest-first ordering; `None` dates sort last
fn compare_dates_desc(a: Option<NaiveDateTime>, b: Option<NaiveDateTime>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// The basename of the directory's single `.mdx` file
fn single_mdx_basename(dir: &Path) -> Result<String, ContentError> {
    let entries = fs::read_dir(dir).map_err(|source| ContentError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut basenames: Vec<String> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().and_then(|e| e.to_str()) == Some("mdx"))
        .filter_map(|p| p.file_stem().and_then(|s| s.to_str()).map(str::to_string))
        .collect();

    match basenames.len() {
        1 => Ok(basenames.remove(0)),
        count => Err(ContentError::AmbiguousContent {
            dir: dir.to_path_buf(),
            count,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_post(root: &Path, slug: &str, document: &str) {
        let dir = root.join(slug);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{slug}.mdx")), document).unwrap();
    }

    fn dated_post(title: &str, date: &str) -> String {
        format!("---\ntitle: {title}\ndate: {date}\n---\nBody of {title}.\n")
    }

    #[test]
    fn test_round_trip() {
        let tmp = TempDir::new().unwrap();
        write_post(
            tmp.path(),
            "my-post",
            "---\ntitle: Hello World\ndescription: A test post\ndate: 2024-01-01\n---\nBody text here.\n",
        );

        let repo = PostRepository::new(tmp.path());
        let post = repo.get_post("my-post").unwrap();

        assert_eq!(post.slug, "my-post");
        assert_eq!(post.meta.title, Some("Hello World".to_string()));
        assert_eq!(post.meta.description, Some("A test post".to_string()));
        assert_eq!(post.meta.date, Some("2024-01-01".to_string()));
        assert_eq!(post.content, "Body text here.\n");
    }

    #[test]
    fn test_slug_matches_request() {
        let tmp = TempDir::new().unwrap();
        write_post(tmp.path(), "alpha", &dated_post("Alpha", "2024-03-01"));
        write_post(tmp.path(), "beta", &dated_post("Beta", "2024-02-01"));

        let repo = PostRepository::new(tmp.path());
        for slug in repo.list_slugs().unwrap() {
            assert_eq!(repo.get_post(&slug).unwrap().slug, slug);
        }
    }

    #[test]
    fn test_missing_slug_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let repo = PostRepository::new(tmp.path());

        let err = repo.get_post("missing-slug").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_list_slugs_sorted() {
        let tmp = TempDir::new().unwrap();
        write_post(tmp.path(), "zebra", &dated_post("Z", "2024-01-01"));
        write_post(tmp.path(), "apple", &dated_post("A", "2024-01-02"));
        // a stray file in the posts root is not a post
        fs::write(tmp.path().join("notes.txt"), "not a post").unwrap();

        let repo = PostRepository::new(tmp.path());
        assert_eq!(repo.list_slugs().unwrap(), ["apple", "zebra"]);
    }

    #[test]
    fn test_missing_posts_root_lists_nothing() {
        let tmp = TempDir::new().unwrap();
        let repo = PostRepository::new(tmp.path().join("does-not-exist"));
        assert!(repo.list_slugs().unwrap().is_empty());
        assert!(repo.list_posts().unwrap().is_empty());
    }

    #[test]
    fn test_empty_post_directory_is_ambiguous() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("hollow")).unwrap();

        let repo = PostRepository::new(tmp.path());
        let err = repo.list_slugs().unwrap_err();
        assert!(matches!(
            err,
            ContentError::AmbiguousContent { count: 0, .. }
        ));
    }

    #[test]
    fn test_two_mdx_files_are_ambiguous() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("twins");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("twins.mdx"), "one").unwrap();
        fs::write(dir.join("extra.mdx"), "two").unwrap();

        let repo = PostRepository::new(tmp.path());
        let err = repo.list_slugs().unwrap_err();
        assert!(matches!(
            err,
            ContentError::AmbiguousContent { count: 2, .. }
        ));
    }

    #[test]
    fn test_posts_sorted_newest_first() {
        let tmp = TempDir::new().unwrap();
        write_post(tmp.path(), "old", &dated_post("Old", "2023-06-15"));
        write_post(tmp.path(), "new", &dated_post("New", "2024-02-01"));
        write_post(tmp.path(), "middle", &dated_post("Middle", "2023-12-31"));

        let repo = PostRepository::new(tmp.path());
        let posts = repo.list_posts().unwrap();
        let slugs: Vec<&str> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, ["new", "middle", "old"]);

        for pair in posts.windows(2) {
            assert!(pair[0].date() >= pair[1].date());
        }
    }

    #[test]
    fn test_equal_dates_keep_slug_order() {
        let tmp = TempDir::new().unwrap();
        write_post(tmp.path(), "bravo", &dated_post("B", "2024-01-01"));
        write_post(tmp.path(), "alfa", &dated_post("A", "2024-01-01"));
        write_post(tmp.path(), "charlie", &dated_post("C", "2024-01-01"));

        let repo = PostRepository::new(tmp.path());
        let slugs: Vec<String> = repo
            .list_posts()
            .unwrap()
            .into_iter()
            .map(|p| p.slug)
            .collect();
        assert_eq!(slugs, ["alfa", "bravo", "charlie"]);
    }

    #[test]
    fn test_undated_posts_sort_last() {
        let tmp = TempDir::new().unwrap();
        write_post(tmp.path(), "dated", &dated_post("Dated", "2020-01-01"));
        write_post(tmp.path(), "undated", "---\ntitle: Undated\n---\nBody.\n");
        write_post(
            tmp.path(),
            "garbled",
            "---\ntitle: Garbled\ndate: not a date\n---\nBody.\n",
        );

        let repo = PostRepository::new(tmp.path());
        let slugs: Vec<String> = repo
            .list_posts()
            .unwrap()
            .into_iter()
            .map(|p| p.slug)
            .collect();
        assert_eq!(slugs, ["dated", "garbled", "undated"]);
    }

    #[test]
    fn test_malformed_post_fails_alone() {
        let tmp = TempDir::new().unwrap();
        write_post(tmp.path(), "good", &dated_post("Good", "2024-01-01"));
        write_post(tmp.path(), "broken", "---\ntitle: never closed\n\nBody.\n");

        let repo = PostRepository::new(tmp.path());

        let err = repo.get_post("broken").unwrap_err();
        assert!(matches!(err, ContentError::Parse { .. }));

        // the broken post is skipped, not fatal for the listing
        let posts = repo.list_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "good");
    }

    #[test]
    fn test_summaries_match_posts() {
        let tmp = TempDir::new().unwrap();
        write_post(tmp.path(), "one", &dated_post("One", "2024-05-01"));
        write_post(tmp.path(), "two", &dated_post("Two", "2024-05-02"));

        let repo = PostRepository::new(tmp.path());
        let summaries = repo.list_summaries().unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].slug, "two");
        assert_eq!(summaries[0].meta.title, Some("Two".to_string()));
    }
}
