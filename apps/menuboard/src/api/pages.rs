//! # HTML Pages
//!
//! Server-rendered pages built with maud. Every page shares
//! [`base_document`]; the stylesheet and the hero scripts (rotation on the
//! menu, drag-and-drop in the manager) are inlined.

use maud::{DOCTYPE, Markup, PreEscaped, html};
use menuboard_core::primitives::SUB_FILTER_ALL;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use menuboard_core::{Category, MenuItem, MenuListing, SubCategoryFilter};
use std::collections::BTreeMap;

/// Label shown over items with no stock.
pub const SOLD_OUT_LABEL: &str = "재고 없음";

/// Label of the "no sub-category filter" tab.
pub const ALL_SUB_LABEL: &str = "전체";

const CSS: &str = r#"
*{box-sizing:border-box}
body{margin:0;font-family:system-ui,-apple-system,"Apple SD Gothic Neo",sans-serif;background:#faf7f2;color:#222}
a{color:inherit}
.menu-page,.admin-page,.admin-system-page{max-width:1080px;margin:0 auto;padding:16px}
.hero{display:flex;gap:8px;overflow-x:auto;scroll-snap-type:x mandatory;margin-bottom:12px}
.hero img{height:220px;border-radius:12px;scroll-snap-align:start;object-fit:cover}
.menu-tabs{display:flex;gap:8px;border-bottom:1px solid #ddd;padding-bottom:8px}
.menu-tab,.menu-subtab-button{padding:8px 16px;border-radius:999px;text-decoration:none;background:#eee}
.menu-tab--active,.menu-subtab-button--active{background:#222;color:#fff}
.menu-subtabs{display:flex;gap:6px;flex-wrap:wrap;margin:10px 0}
.menu-grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(200px,1fr));gap:14px}
.menu-card{display:block;text-decoration:none;background:#fff;border-radius:12px;overflow:hidden;box-shadow:0 1px 3px rgba(0,0,0,.08)}
.menu-card-image-wrapper{position:relative;aspect-ratio:4/3}
.menu-card-image{width:100%;height:100%;object-fit:cover}
.menu-card-overlay{position:absolute;inset:0;background:rgba(0,0,0,.55);display:flex;align-items:center;justify-content:center}
.menu-card-soldout-text{color:#fff;font-weight:700;font-size:1.2rem}
.menu-card-text{padding:10px 12px}
.menu-card-name{margin:0;font-weight:700}
.menu-card-meta{margin:4px 0;color:#b35c00;font-size:.85rem}
.menu-card-meta--empty{visibility:hidden}
.menu-card-description{margin:0;color:#555;font-size:.9rem}
.menu-detail img{width:100%;max-height:420px;object-fit:cover;border-radius:12px}
.admin-section{background:#fff;border-radius:12px;padding:16px;margin-bottom:16px}
.admin-form{display:grid;gap:10px}
.admin-label{display:grid;gap:4px;font-size:.9rem}
.admin-input,.admin-select,.admin-textarea{padding:8px;border:1px solid #ccc;border-radius:8px;font:inherit}
.admin-table{width:100%;border-collapse:collapse}
.admin-table td,.admin-table th{padding:6px;border-bottom:1px solid #eee;text-align:left;vertical-align:middle}
.admin-table img{width:56px;height:42px;object-fit:cover;border-radius:6px}
.admin-row--hidden{opacity:.5}
.inline{display:inline}
.admin-button-primary,.admin-system-button{background:#222;color:#fff;border:0;border-radius:8px;padding:8px 14px}
.admin-system-gallery{display:flex;flex-wrap:wrap;gap:10px;margin-bottom:16px}
.admin-system-img-box{position:relative;cursor:grab}
.admin-system-img-box img{width:180px;height:120px;object-fit:cover;border-radius:8px}
.admin-system-delete-form{position:absolute;top:4px;right:4px}
.admin-system-delete-btn{border:0;border-radius:50%;width:26px;height:26px;background:rgba(0,0,0,.6);color:#fff}
"#;

const HERO_REORDER_JS: &str = r#"
(function () {
  var gallery = document.querySelector('.admin-system-gallery');
  if (!gallery) return;
  var dragged = null;
  gallery.addEventListener('dragstart', function (e) {
    dragged = e.target.closest('.admin-system-img-box');
  });
  gallery.addEventListener('dragover', function (e) { e.preventDefault(); });
  gallery.addEventListener('drop', function (e) {
    e.preventDefault();
    var target = e.target.closest('.admin-system-img-box');
    if (!dragged || !target || dragged === target) return;
    var boxes = Array.prototype.slice.call(gallery.children);
    if (boxes.indexOf(dragged) < boxes.indexOf(target)) {
      target.after(dragged);
    } else {
      target.before(dragged);
    }
    var order = Array.prototype.map.call(gallery.children, function (b) {
      return b.getAttribute('data-src');
    });
    var fd = new FormData();
    fd.append('_intent', 'save-order');
    fd.append('order', JSON.stringify(order));
    fetch('/admin/system', { method: 'POST', body: fd });
  });
})();
"#;

/// Advances the public hero strip one image at a time, wrapping at the end.
const HERO_ROTATE_JS: &str = r#"
(function () {
  var strip = document.querySelector('.hero');
  if (!strip || strip.children.length < 2) return;
  var index = 0;
  setInterval(function () {
    index = (index + 1) % strip.children.length;
    strip.scrollTo({ left: strip.children[index].offsetLeft - strip.offsetLeft, behavior: 'smooth' });
  }, HERO_INTERVAL_MS);
})();
"#;

/// Milliseconds each hero image stays in view.
pub const HERO_INTERVAL_MS: u32 = 4000;

// =============================================================================
// LAYOUT
// =============================================================================

/// Shared document shell.
fn base_document(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="ko" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body {
                (content)
            }
        }
    }
}

fn menu_href(base: &str, category: Category, sub: &str) -> String {
    if sub == SUB_FILTER_ALL {
        format!("{}?category={}", base, category)
    } else {
        format!("{}?category={}&sub={}", base, category, encode_query(sub))
    }
}

/// Unreserved characters stay as they are, everything else is escaped.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode a query value.
fn encode_query(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}

fn category_tabs(base: &str, active: Category) -> Markup {
    html! {
        nav.menu-tabs {
            @for category in Category::ALL {
                a.menu-tab.menu-tab--active[category == active]
                    href=(menu_href(base, category, SUB_FILTER_ALL)) { (category.label()) }
            }
        }
    }
}

fn sub_tabs(base: &str, category: Category, options: &[String], active: &SubCategoryFilter) -> Markup {
    html! {
        nav.menu-subtabs {
            a.menu-subtab-button.menu-subtab-button--active[*active == SubCategoryFilter::All]
                href=(menu_href(base, category, SUB_FILTER_ALL)) { (ALL_SUB_LABEL) }
            @for sub in options {
                a.menu-subtab-button.menu-subtab-button--active[active.as_str() == sub.as_str()]
                    href=(menu_href(base, category, sub)) { (sub) }
            }
        }
    }
}

// =============================================================================
// PUBLIC PAGES
// =============================================================================

fn menu_card(item: &MenuItem) -> Markup {
    html! {
        a.menu-card href={ "/menu/items/" (item.id.0) } {
            div.menu-card-image-wrapper {
                img.menu-card-image src=(item.image_url) alt=(item.name);
                @if item.is_sold_out() {
                    div.menu-card-overlay {
                        span.menu-card-soldout-text { (SOLD_OUT_LABEL) }
                    }
                }
            }
            div.menu-card-text {
                p.menu-card-name { (item.name) }
                p.menu-card-meta.menu-card-meta--empty[item.meta_info_description.is_none()] {
                    (item.meta_info_description.as_deref().unwrap_or_default())
                }
                p.menu-card-description { (item.description.as_deref().unwrap_or_default()) }
            }
        }
    }
}

/// The public menu: hero strip, category and sub-category tabs, cards.
pub fn menu_page(listing: &MenuListing, hero_images: &[String]) -> Markup {
    let content = html! {
        main.menu-page {
            @if !hero_images.is_empty() {
                section.hero {
                    @for src in hero_images {
                        img src=(src) alt="hero";
                    }
                }
                @if hero_images.len() > 1 {
                    script {
                        (PreEscaped(HERO_ROTATE_JS.replace("HERO_INTERVAL_MS", &HERO_INTERVAL_MS.to_string())))
                    }
                }
            }
            (category_tabs("/menu", listing.category))
            (sub_tabs("/menu", listing.category, &listing.sub_categories, &listing.active))
            section.menu-grid {
                @for item in &listing.items {
                    (menu_card(item))
                }
            }
        }
    };
    base_document("Menu", content)
}

/// Detail view of one item.
pub fn item_page(item: &MenuItem) -> Markup {
    let back = menu_href("/menu", item.category, SUB_FILTER_ALL);
    let content = html! {
        main.menu-page.menu-detail {
            p { a href=(back) aria-label="닫기" { "×" } }
            div.menu-card-image-wrapper {
                img src=(item.image_url) alt=(item.name);
                @if item.is_sold_out() {
                    div.menu-card-overlay {
                        span.menu-card-soldout-text { (SOLD_OUT_LABEL) }
                    }
                }
            }
            h2 { (item.name) }
            @if let Some(meta) = &item.meta_info_description {
                p.menu-card-meta { (meta) }
            }
            p.menu-card-description { (item.description.as_deref().unwrap_or_default()) }
        }
    };
    base_document(&item.name, content)
}

// =============================================================================
// ADMIN PAGES
// =============================================================================

fn sub_category_datalists(options: &BTreeMap<Category, Vec<String>>) -> Markup {
    html! {
        @for (category, subs) in options {
            datalist id={ "sub-options-" (category.as_str()) } {
                @for sub in subs {
                    option value=(sub) {}
                }
            }
        }
    }
}

fn category_select(selected: Category) -> Markup {
    html! {
        select.admin-select name="category" {
            @for category in Category::ALL {
                option value=(category.as_str()) selected[category == selected] { (category.label()) }
            }
        }
    }
}

fn hidden_intent(intent: &str, item: &MenuItem) -> Markup {
    html! {
        input type="hidden" name="_intent" value=(intent);
        input type="hidden" name="id" value=(item.id.0);
    }
}

fn admin_row(item: &MenuItem) -> Markup {
    html! {
        tr.admin-row--hidden[item.hide] {
            td { img src=(item.image_url) alt=(item.name); }
            td {
                strong { (item.name) }
                @if let Some(sub) = &item.sub_category { " · " (sub) }
            }
            td {
                form.inline method="post" enctype="multipart/form-data" {
                    (hidden_intent("adjustStock", item))
                    input type="hidden" name="direction" value="down";
                    button type="submit" { "−" }
                }
                " " (item.stock) " "
                form.inline method="post" enctype="multipart/form-data" {
                    (hidden_intent("adjustStock", item))
                    input type="hidden" name="direction" value="up";
                    button type="submit" { "+" }
                }
            }
            td {
                form.inline method="post" enctype="multipart/form-data" {
                    (hidden_intent("toggle-hide", item))
                    input type="hidden" name="hide" value=(if item.hide { "false" } else { "true" });
                    button type="submit" { @if item.hide { "보이기" } @else { "숨기기" } }
                }
            }
            td { a href={ "/admin/items/" (item.id.0) "/edit" } { "수정" } }
            td {
                form.inline method="post" enctype="multipart/form-data" {
                    (hidden_intent("delete-item", item))
                    button type="submit" { "삭제" }
                }
            }
            td { (item.created_at.format("%Y-%m-%d").to_string()) }
        }
    }
}

/// Admin back office: create form and the item table for one category tab.
pub fn admin_page(
    items: &[MenuItem],
    options: &BTreeMap<Category, Vec<String>>,
    category: Category,
    active: &SubCategoryFilter,
) -> Markup {
    let empty = Vec::new();
    let tab_subs = options.get(&category).unwrap_or(&empty);
    let content = html! {
        main.admin-page {
            h1 { "Admin 메뉴 관리" }
            p { a href="/admin/system" { "시스템 설정" } " · " a href="/menu" { "메뉴 보기" } }
            (sub_category_datalists(options))

            section.admin-section {
                h2 { "새 메뉴 추가" }
                form.admin-form method="post" enctype="multipart/form-data" {
                    input type="hidden" name="_intent" value="create";
                    label.admin-label { "이름" input.admin-input name="name" required; }
                    label.admin-label {
                        "메타 정보 설명 (옵션)"
                        input.admin-input name="metaInfoDescription" placeholder="예: 오늘의 추천, 한정 수량 등";
                    }
                    label.admin-label { "설명" textarea.admin-textarea name="description" {} }
                    label.admin-label { "카테고리" (category_select(category)) }
                    label.admin-label {
                        "하위 분류 (선택, 예: beer, wine)"
                        input.admin-input name="subCategory" list={ "sub-options-" (category.as_str()) };
                    }
                    label.admin-label { "이미지 업로드" input type="file" name="image" accept="image/*"; }
                    label.admin-label { "초기 재고" input.admin-input type="number" name="stock" min="0" value="0"; }
                    button.admin-button-primary type="submit" { "추가" }
                }
            }

            section.admin-section {
                h2 { "기존 메뉴" }
                (category_tabs("/admin", category))
                (sub_tabs("/admin", category, tab_subs, active))
                table.admin-table {
                    @for item in items {
                        (admin_row(item))
                    }
                }
            }
        }
    };
    base_document("Admin 메뉴 관리", content)
}

/// Edit form for one item.
pub fn edit_page(item: &MenuItem, options: &BTreeMap<Category, Vec<String>>) -> Markup {
    let content = html! {
        main.admin-page {
            p { a href="/admin" { "← 목록으로" } }
            (sub_category_datalists(options))
            section.admin-section {
                h2 { "메뉴 수정" }
                form.admin-form method="post" action="/admin" enctype="multipart/form-data" {
                    (hidden_intent("update-item", item))
                    input type="hidden" name="existingImageUrl" value=(item.image_url);
                    label.admin-label { "이름" input.admin-input name="name" value=(item.name) required; }
                    label.admin-label {
                        "메타 정보 설명"
                        input.admin-input name="metaInfoDescription"
                            value=(item.meta_info_description.as_deref().unwrap_or_default());
                    }
                    label.admin-label {
                        "설명"
                        textarea.admin-textarea name="description" {
                            (item.description.as_deref().unwrap_or_default())
                        }
                    }
                    label.admin-label { "카테고리" (category_select(item.category)) }
                    label.admin-label {
                        "하위 분류"
                        input.admin-input name="subCategory" list={ "sub-options-" (item.category.as_str()) }
                            value=(item.sub_category.as_deref().unwrap_or_default());
                    }
                    label.admin-label { "재고" input.admin-input type="number" name="stock" min="0" value=(item.stock); }
                    label.admin-label {
                        "이미지 변경"
                        img src=(item.image_url) alt=(item.name) width="120";
                        input type="file" name="image" accept="image/*";
                    }
                    button.admin-button-primary type="submit" { "저장" }
                }
            }
        }
    };
    base_document("메뉴 수정", content)
}

/// Hero image manager: ordered gallery, delete buttons, upload form.
pub fn system_page(images: &[String]) -> Markup {
    let content = html! {
        main.admin-system-page {
            h1 { "시스템 설정" }
            p { a href="/admin" { "← 메뉴 관리" } }
            h2 { "현재 업로드된 Hero 이미지" }
            div.admin-system-gallery {
                @for src in images {
                    div.admin-system-img-box draggable="true" data-src=(src) {
                        form.admin-system-delete-form method="post" enctype="multipart/form-data" {
                            input type="hidden" name="_intent" value="delete-hero-image";
                            input type="hidden" name="filePath" value=(src);
                            button.admin-system-delete-btn type="submit" { "×" }
                        }
                        img src=(src) alt="hero" draggable="false";
                    }
                }
            }
            div.admin-system-upload-box {
                h2 { "Hero 이미지 업로드" }
                form method="post" enctype="multipart/form-data" {
                    input type="file" name="heroImages" multiple accept="image/*";
                    button.admin-system-button type="submit" { "업로드" }
                }
            }
            script { (PreEscaped(HERO_REORDER_JS)) }
        }
    };
    base_document("시스템 설정", content)
}

// =============================================================================
// TESTS
// =============================================================================
