//! # Seed Data
//!
//! The starter menu loaded by `menuboard seed`: ten drinks and two foods.

use crate::{Category, NewMenuItem};

/// Starter items, in creation order.
pub fn starter_menu() -> Vec<NewMenuItem> {
    let drinks = [
        ("베트남 연유 커피", "진한 드립 커피에 달콤한 연유", 1, 7),
        ("아이스 연유 커피", "차갑게 즐기는 연유 커피", 2, 10),
        ("라임 소다", "상큼한 라임향 탄산수", 3, 5),
        ("패션후르츠 소다", "과일향이 풍부한 달콤 상큼 소다", 4, 8),
        ("망고 스무디", "부드러운 망고 과일 스무디", 5, 4),
        ("바나나 스무디", "달콤한 바나나 풍미 가득", 6, 9),
        ("코코넛 밀크 커피", "부드럽고 고소한 코코넛 커피", 7, 6),
        ("복숭아 아이스티", "달콤하고 시원한 복숭아 향", 8, 12),
        ("레몬 아이스티", "깔끔하고 상큼한 아이스티", 9, 11),
        ("얼그레이 밀크티", "풍미 깊은 얼그레이 향", 10, 3),
    ];
    let foods = [
        ("Phở bò", "소고기와 쌀국수, 향신채가 들어간 따뜻한 국수", 1, 9),
        (
            "Bún bò Huế",
            "매콤한 육수에 소고기와 쌀국수가 들어간 후에 스타일 국수",
            2,
            1,
        ),
    ];

    drinks
        .into_iter()
        .map(|row| entry(Category::Drink, "drink", row))
        .chain(foods.into_iter().map(|row| entry(Category::Food, "food", row)))
        .collect()
}

fn entry(
    category: Category,
    image_prefix: &str,
    (name, description, image, stock): (&str, &str, u32, i64),
) -> NewMenuItem {
    NewMenuItem::new(name, category)
        .with_description(description)
        .with_image(format!("/images/{}{}.jpg", image_prefix, image))
        .with_stock(stock)
}
