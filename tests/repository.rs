use diesel::prelude::*;
use place_directory::domain::category::{CategoryLevel, CategoryNode, CategoryType, NewCategory};
use place_directory::domain::geo::Coordinate;
use place_directory::domain::menu::NewMenuItem;
use place_directory::domain::place::{NewPlace, Place};
use place_directory::domain::review::NewReview;
use place_directory::domain::types::{
    CategoryId, CategoryName, MenuItemName, MenuPrice, PhotoUrl, PlaceId, PlaceName, Rating,
    ReviewComment, Slug, UserId,
};
use place_directory::repository::{
    CategoryListQuery, CategoryReader, CategoryWriter, DieselRepository, FavoriteReader,
    FavoriteWriter, MenuReader, MenuWriter, PlaceListQuery, PlaceReader, PlaceWriter,
    ProfileReader, ReviewListQuery, ReviewReader, ReviewWriter,
};
use place_directory::schema::profiles;

mod common;

fn new_category(name: &str, level: CategoryLevel) -> NewCategory {
    let name = CategoryName::new(name).expect("valid category name");
    NewCategory {
        slug: Slug::from_name(&name).expect("valid slug"),
        name,
        description: None,
        image_url: None,
        sort_order: 0,
        level,
    }
}

fn new_place(name: &str, category_id: Option<CategoryId>, coordinate: Option<Coordinate>) -> NewPlace {
    let name = PlaceName::new(name).expect("valid place name");
    NewPlace {
        slug: Slug::from_name(&name).expect("valid slug"),
        name,
        description: None,
        image_url: None,
        address: None,
        phone: None,
        opening_hours: None,
        coordinate,
        category_id,
        is_visible: true,
        tiktok_url: None,
        facebook_url: None,
        instagram_url: None,
    }
}

fn new_review(place_id: PlaceId, user: &str, rating: i32, photos: &[&str]) -> NewReview {
    NewReview {
        place_id,
        user_id: UserId::new(user).expect("valid user id"),
        rating: Rating::new(rating).expect("valid rating"),
        comment: Some(ReviewComment::new("Great food").expect("valid comment")),
        photos: photos
            .iter()
            .map(|url| PhotoUrl::new(*url).expect("valid photo url"))
            .collect(),
    }
}

/// Province -> district -> vertical, returned in that order.
fn seed_tree(repo: &DieselRepository) -> (CategoryNode, CategoryNode, CategoryNode) {
    let province = repo
        .create_category(&new_category("Erbil", CategoryLevel::Province))
        .expect("should create province");
    let district = repo
        .create_category(&new_category(
            "Ankawa",
            CategoryLevel::District {
                province_id: province.id,
            },
        ))
        .expect("should create district");
    let vertical = repo
        .create_category(&new_category(
            "Restaurants",
            CategoryLevel::Vertical {
                district_id: Some(district.id),
            },
        ))
        .expect("should create vertical");
    (province, district, vertical)
}

fn seed_place(repo: &DieselRepository, name: &str, category_id: Option<CategoryId>) -> Place {
    repo.create_place(&new_place(name, category_id, None))
        .expect("should create place")
}

#[test]
fn category_tree_round_trips_levels() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();

    let (province, district, vertical) = seed_tree(&repo);

    assert_eq!(province.level, CategoryLevel::Province);
    assert_eq!(district.parent_id(), Some(province.id));

    let loaded = repo
        .get_category_by_slug(&Slug::new("restaurants").unwrap())
        .expect("should query by slug")
        .expect("vertical should exist");
    assert_eq!(loaded.id, vertical.id);
    assert_eq!(
        loaded.level,
        CategoryLevel::Vertical {
            district_id: Some(district.id)
        }
    );

    let provinces = repo
        .list_categories(CategoryListQuery::of_type(CategoryType::Province))
        .expect("should list provinces");
    assert_eq!(provinces.len(), 1);

    let children = repo
        .list_categories(CategoryListQuery::children_of(province.id))
        .expect("should list children");
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].id, district.id);
}

#[test]
fn categories_order_by_sort_key_then_name() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();

    let mut zakho = new_category("Zakho", CategoryLevel::Province);
    zakho.sort_order = -1;
    repo.create_categories(&[
        new_category("Erbil", CategoryLevel::Province),
        new_category("Duhok", CategoryLevel::Province),
        zakho,
    ])
    .expect("should create provinces");

    let names: Vec<String> = repo
        .list_categories(CategoryListQuery::of_type(CategoryType::Province))
        .expect("should list provinces")
        .into_iter()
        .map(|c| c.name.into_inner())
        .collect();
    assert_eq!(names, vec!["Zakho", "Duhok", "Erbil"]);
}

#[test]
fn delete_category_cascades_and_uncategorises_places() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();

    let (province, district, vertical) = seed_tree(&repo);
    let place = seed_place(&repo, "Kebab House", Some(vertical.id));

    let affected = repo
        .delete_category(province.id)
        .expect("should delete province");
    assert_eq!(affected, 1);

    assert!(repo.get_category_by_id(district.id).unwrap().is_none());
    assert!(repo.get_category_by_id(vertical.id).unwrap().is_none());

    let place = repo
        .get_place_by_id(place.id)
        .expect("should query place")
        .expect("place should survive");
    assert_eq!(place.category_id, None);
}

#[test]
fn update_category_overwrites_fields() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();

    let (_, district, vertical) = seed_tree(&repo);

    let mut changes = new_category(
        "Food",
        CategoryLevel::Vertical {
            district_id: Some(district.id),
        },
    );
    changes.sort_order = 3;
    let affected = repo
        .update_category(vertical.id, &changes)
        .expect("should update category");
    assert_eq!(affected, 1);

    let updated = repo.get_category_by_id(vertical.id).unwrap().unwrap();
    assert_eq!(updated.name.as_str(), "Food");
    assert_eq!(updated.slug.as_str(), "food");
    assert_eq!(updated.sort_order, 3);
}

#[test]
fn place_listing_filters_and_counts() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();

    let (_, _, vertical) = seed_tree(&repo);
    let erbil = Coordinate::new(36.19, 44.01).unwrap();
    let visible = repo
        .create_place(&new_place("Bakery", Some(vertical.id), Some(erbil)))
        .expect("should create place");
    let hidden = seed_place(&repo, "Hidden Grill", Some(vertical.id));
    repo.set_place_visibility(hidden.id, false)
        .expect("should hide place");
    seed_place(&repo, "Uncategorised", None);

    assert_eq!(visible.coordinate, Some(erbil));

    let (total, places) = repo
        .list_places(PlaceListQuery::visible().category(vertical.id))
        .expect("should list places");
    assert_eq!(total, 1);
    assert_eq!(places[0].id, visible.id);

    let (total, _) = repo
        .list_places(PlaceListQuery::default())
        .expect("should list all places");
    assert_eq!(total, 3);

    assert_eq!(repo.count_visible_places(vertical.id).unwrap(), 1);
    let counts = repo.count_visible_places_by_category().unwrap();
    assert_eq!(counts.get(&vertical.id), Some(&1));
    assert_eq!(counts.len(), 1);
}

#[test]
fn place_listing_newest_first_paginates() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();

    let first = seed_place(&repo, "First", None);
    let second = seed_place(&repo, "Second", None);
    let third = seed_place(&repo, "Third", None);

    let (total, page) = repo
        .list_places(PlaceListQuery::default().newest_first().paginate(1, 2))
        .expect("should list first page");
    assert_eq!(total, 3);
    let ids: Vec<PlaceId> = page.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![third.id, second.id]);

    let (_, page) = repo
        .list_places(PlaceListQuery::default().newest_first().paginate(2, 2))
        .expect("should list second page");
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].id, first.id);

    let (total, page) = repo
        .list_places(PlaceListQuery::default().newest_first().paginate(usize::MAX, 20))
        .expect("should list a page far past the end");
    assert_eq!(total, 3);
    assert!(page.is_empty());
}

#[test]
fn reviews_carry_photos_authors_and_ratings() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();

    let place = seed_place(&repo, "Kebab House", None);

    let mut conn = test_db
        .pool()
        .get()
        .expect("should acquire DB connection for setup");
    diesel::insert_into(profiles::table)
        .values((
            profiles::user_id.eq("alice"),
            profiles::display_name.eq("Alice"),
            profiles::is_admin.eq(false),
        ))
        .execute(&mut conn)
        .expect("should insert profile");

    let review = new_review(
        place.id,
        "alice",
        4,
        &["https://cdn.example.com/a.jpg", "https://cdn.example.com/b.jpg"],
    );
    let first_id = repo.create_review(&review).expect("should create review");
    repo.add_review_photos(first_id, &review.photos)
        .expect("should add photos");
    let second_id = repo
        .create_review(&new_review(place.id, "bob", 2, &[]))
        .expect("should create second review");

    let (total, reviews) = repo
        .list_reviews(ReviewListQuery::default().place(place.id))
        .expect("should list reviews");
    assert_eq!(total, 2);
    assert_eq!(reviews[0].id, second_id);
    assert!(reviews[0].photos.is_empty());
    assert!(reviews[0].author.is_none());

    let alice = &reviews[1];
    assert_eq!(alice.id, first_id);
    assert_eq!(
        alice.photos.iter().map(|p| p.as_str()).collect::<Vec<_>>(),
        vec!["https://cdn.example.com/a.jpg", "https://cdn.example.com/b.jpg"]
    );
    assert_eq!(alice.author.as_ref().map(|a| a.as_str()), Some("Alice"));
    assert_eq!(
        alice.place_name.as_ref().map(|n| n.as_str()),
        Some("Kebab House")
    );

    let summaries = repo.rating_summaries(&[place.id]).unwrap();
    let summary = summaries.get(&place.id).expect("place should have a summary");
    assert_eq!(summary.review_count, 2);
    assert_eq!(summary.avg_rating, 3.0);

    let (total, _) = repo
        .list_reviews(ReviewListQuery::default().user(UserId::new("alice").unwrap()))
        .unwrap();
    assert_eq!(total, 1);

    assert_eq!(repo.delete_review(first_id).unwrap(), 1);
    assert!(repo.get_review_by_id(first_id).unwrap().is_none());
}

#[test]
fn favorites_are_unique_per_user_and_place() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();

    let place = seed_place(&repo, "Kebab House", None);
    let user = UserId::new("alice").unwrap();

    assert!(!repo.is_favorite(&user, place.id).unwrap());
    assert_eq!(repo.add_favorite(&user, place.id).unwrap(), 1);
    assert_eq!(repo.add_favorite(&user, place.id).unwrap(), 0);
    assert!(repo.is_favorite(&user, place.id).unwrap());
    assert_eq!(repo.list_favorites(&user).unwrap().len(), 1);

    assert_eq!(repo.remove_favorite(&user, place.id).unwrap(), 1);
    assert!(repo.list_favorites(&user).unwrap().is_empty());
}

#[test]
fn deleting_place_removes_dependents() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();

    let place = seed_place(&repo, "Kebab House", None);
    let user = UserId::new("alice").unwrap();
    repo.add_favorite(&user, place.id).unwrap();
    repo.create_review(&new_review(place.id, "alice", 5, &[]))
        .unwrap();

    assert_eq!(repo.delete_place(place.id).unwrap(), 1);

    assert!(repo.list_favorites(&user).unwrap().is_empty());
    let (total, _) = repo.list_reviews(ReviewListQuery::default()).unwrap();
    assert_eq!(total, 0);
}

#[test]
fn menu_items_crud_and_visibility() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();

    let place = seed_place(&repo, "Kebab House", None);
    let item = NewMenuItem {
        place_id: place.id,
        name: MenuItemName::new("Tea").unwrap(),
        description: None,
        price: Some(MenuPrice::new(1.5).unwrap()),
        image_url: None,
        section: None,
        is_visible: true,
    };
    repo.create_menu_item(&item).expect("should create item");

    let items = repo.list_menu_items(place.id, true).unwrap();
    assert_eq!(items.len(), 1);
    let id = items[0].id;
    assert_eq!(items[0].price.map(|p| p.get()), Some(1.5));

    let mut changes = item.clone();
    changes.name = MenuItemName::new("Black Tea").unwrap();
    assert_eq!(repo.update_menu_item(id, &changes).unwrap(), 1);
    assert_eq!(repo.set_menu_item_visibility(id, false).unwrap(), 1);

    assert!(repo.list_menu_items(place.id, true).unwrap().is_empty());
    let all = repo.list_menu_items(place.id, false).unwrap();
    assert_eq!(all[0].name.as_str(), "Black Tea");
    assert!(!all[0].is_visible);

    assert_eq!(repo.delete_menu_item(id).unwrap(), 1);
    assert!(repo.get_menu_item_by_id(id).unwrap().is_none());
}

#[test]
fn profiles_are_optional() {
    let test_db = common::TestDb::new();
    let repo = test_db.repo();

    let mut conn = test_db.pool().get().unwrap();
    diesel::insert_into(profiles::table)
        .values((profiles::user_id.eq("admin"), profiles::is_admin.eq(true)))
        .execute(&mut conn)
        .expect("should insert profile");

    let profile = repo
        .get_profile(&UserId::new("admin").unwrap())
        .unwrap()
        .expect("profile should exist");
    assert!(profile.is_admin);
    assert!(profile.display_name.is_none());

    assert!(
        repo.get_profile(&UserId::new("nobody").unwrap())
            .unwrap()
            .is_none()
    );
}
