//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tower_sessions::Session;
use tracing::instrument;

use byttech_core::catalog::Category;
use byttech_core::pipeline::{self, SortKey};
use byttech_core::Product;

use crate::error::Result;
use crate::filters;
use crate::models::PageChrome;
use crate::routes::catalog::ProductCardView;
use crate::state::AppState;

// =============================================================================
// Hero and Category Content (static)
// =============================================================================

/// A single slide in the hero strip.
///
/// The strip scrolls with CSS scroll snapping; there are no arrows, dots
/// or autoplay because the site ships no script.
#[derive(Clone)]
pub struct HeroSlide {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub button_text: &'static str,
    pub button_url: &'static str,
    pub image_path: &'static str,
}

fn hero_slides() -> Vec<HeroSlide> {
    vec![
        HeroSlide {
            title: "Техника для дома, которая работает годами",
            subtitle: "Духовые шкафы, варочные панели и холодильники ведущих брендов.",
            button_text: "Смотреть каталог",
            button_url: "/catalog",
            image_path: "/static/images/hero1.svg",
        },
        HeroSlide {
            title: "Скидки недели на встраиваемую технику",
            subtitle: "Обновите кухню: варочные панели от 14 990 ₽.",
            button_text: "К акциям",
            button_url: "/catalog?sort=price-asc",
            image_path: "/static/images/hero2.svg",
        },
        HeroSlide {
            title: "Новинки сезона уже в продаже",
            subtitle: "Свежие поступления от Miele, Bosch и Siemens.",
            button_text: "Показать новинки",
            button_url: "/catalog?sort=new",
            image_path: "/static/images/hero3.svg",
        },
    ]
}

/// A category tile linking into the pre-filtered catalog.
#[derive(Clone)]
pub struct CategoryTile {
    pub title: &'static str,
    pub href: String,
    pub image: &'static str,
}

fn category_tiles() -> Vec<CategoryTile> {
    Category::ALL
        .into_iter()
        .map(|category| CategoryTile {
            title: category.title_ru(),
            href: format!("/catalog?category={}", category.slug()),
            image: category.image_path(),
        })
        .collect()
}

/// Number of products in the popular strip.
const POPULAR_COUNT: usize = 8;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub chrome: PageChrome,
    pub slides: Vec<HeroSlide>,
    pub tiles: Vec<CategoryTile>,
    pub popular: Vec<ProductCardView>,
}

/// Display the home page.
#[instrument(skip(state, session))]
pub async fn home(State(state): State<AppState>, session: Session) -> Result<HomeTemplate> {
    let chrome = PageChrome::load(&session).await?;

    let mut items: Vec<&Product> = state.catalog().iter().collect();
    pipeline::sort_products(&mut items, SortKey::Popular);
    let popular = items
        .into_iter()
        .take(POPULAR_COUNT)
        .map(ProductCardView::from)
        .collect();

    Ok(HomeTemplate {
        chrome,
        slides: hero_slides(),
        tiles: category_tiles(),
        popular,
    })
}
