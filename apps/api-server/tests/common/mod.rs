//! Shared fixtures: random post generation and app construction.

#![allow(dead_code, unused_macros)]

use chrono::{Duration, Utc};
use rand::Rng;
use rand::seq::SliceRandom;

use blog_core::domain::{Author, BlogPost, NewPost};
use blog_core::ports::PostRepository;

const FIRST_NAMES: &[&str] = &[
    "Ada", "Grace", "Alan", "Edsger", "Barbara", "Donald", "Frances", "Ken", "Margaret", "Niklaus",
];
const LAST_NAMES: &[&str] = &[
    "Lovelace", "Hopper", "Turing", "Dijkstra", "Liskov", "Knuth", "Allen", "Thompson", "Hamilton",
    "Wirth",
];
const WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "labore", "magna", "aliqua",
];

fn words(rng: &mut impl Rng, count: usize) -> String {
    (0..count)
        .map(|_| *WORDS.choose(rng).unwrap())
        .collect::<Vec<_>>()
        .join(" ")
}

/// A post with random author, title and content, created within the last year.
pub fn random_post() -> NewPost {
    let mut rng = rand::thread_rng();

    let author = Author::new(
        *FIRST_NAMES.choose(&mut rng).unwrap(),
        *LAST_NAMES.choose(&mut rng).unwrap(),
    )
    .unwrap();
    let title_len = rng.gen_range(2..6);
    let title = words(&mut rng, title_len);
    let content_len = rng.gen_range(20..80);
    let content = words(&mut rng, content_len);
    let created = Utc::now() - Duration::minutes(rng.gen_range(0..525_600));

    NewPost::new(author, title, content)
        .unwrap()
        .with_created(created)
}

/// Seed `count` random posts into `repo`.
pub async fn seed_posts(repo: &dyn PostRepository, count: usize) -> Vec<BlogPost> {
    let posts = (0..count).map(|_| random_post()).collect();
    repo.insert_many(posts).await.unwrap()
}

/// Build a test service over `$state` with the production routes.
macro_rules! init_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(api_server::observability::RequestIdMiddleware)
                .app_data(actix_web::web::Data::new($state.clone()))
                .configure(api_server::handlers::configure_routes),
        )
        .await
    };
}
