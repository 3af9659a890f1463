// Copyright 2025 Cowboy AI, LLC.

//! Limits, colimits and set-like operations on ontology categories
//!
//! Every operation builds a fresh category from its operands and never touches
//! them. Results are materialized eagerly.
//!
//! | operation    | shape                     | result size             |
//! |--------------|---------------------------|-------------------------|
//! | `coproduct`  | tagged disjoint union     | `|A| + |B|`             |
//! | `product`    | pairwise combination      | `|A| * |B|`             |
//! | `pullback`   | pairs with equal images   | at most `|A| * |B|`     |
//! | `pushout`    | union plus equivalences   | `|A| + |B|`             |
//! | `difference` | objects of A not in B     | at most `|A|`           |

use std::collections::HashSet;

use indexmap::IndexMap;
use tracing::debug;

use super::functor::Functor;
use super::morphism::{Morphism, MorphismType};
use super::object::Object;
use super::ontology_category::Category;

fn log_built(operation: &str, result: &Category) {
    debug!(
        operation,
        name = %result.name,
        objects = result.len_objects(),
        morphisms = result.len_morphisms(),
        "Built category"
    );
}

/// Copy objects and morphisms of `source` into `result` with a name prefix
fn tag_into(result: &mut Category, source: &Category, prefix: &str, label: &str) {
    for object in source.objects().values() {
        let mut tagged = object.renamed(format!("{prefix}.{}", object.name));
        tagged.semantic_signature = format!("[{label}] {}", object.semantic_signature);
        result.add_object(tagged);
    }

    let endpoint = |result: &Category, object: &Object| {
        let name = format!("{prefix}.{}", object.name);
        result
            .object(&name)
            .cloned()
            .unwrap_or_else(|| Object::new(name, object.domain.clone()))
    };

    for morphism in source.morphisms().values() {
        let tagged = Morphism {
            name: format!("{prefix}.{}", morphism.name),
            source: endpoint(&*result, &morphism.source),
            target: endpoint(&*result, &morphism.target),
            morphism_type: morphism.morphism_type,
            properties: morphism.properties.clone(),
            semantic_description: format!("[{label}] {}", morphism.semantic_description),
        };
        result.add_morphism(tagged);
    }
}

/// Name tags for the two sides of a disjoint union
///
/// The right-hand tag is primed until none of its tagged names collides with a
/// tagged name of the left side, so no entry of the left side is overwritten.
fn side_tags(left: &Category, right: &Category) -> (String, String) {
    fn lands_on<V>(prefix: &str, tagged: &str, names: &IndexMap<String, V>) -> bool {
        tagged
            .strip_prefix(prefix)
            .is_some_and(|rest| names.contains_key(rest))
    }

    let left_prefix = format!("{}.", left.name);
    let mut tag = right.name.clone();
    loop {
        let clashes = right
            .objects()
            .keys()
            .any(|name| lands_on(&left_prefix, &format!("{tag}.{name}"), left.objects()))
            || right
                .morphisms()
                .keys()
                .any(|name| lands_on(&left_prefix, &format!("{tag}.{name}"), left.morphisms()));
        if !clashes {
            return (left.name.clone(), tag);
        }
        tag.push('\'');
    }
}

/// Coproduct `A + B`: disjoint union with every name prefixed by its category
///
/// When a prefixed name of B would land on one of A's (equal category names,
/// or dotted names such as `A` holding `B.X` next to `A.B` holding `X`), B's
/// prefix gets primes until the two sides are apart.
pub fn coproduct(a: &Category, b: &Category, name: Option<&str>) -> Category {
    let name = name
        .map(str::to_string)
        .unwrap_or_else(|| format!("({} + {})", a.name, b.name));
    let mut result = Category::new(name, format!("Coproduct of {} and {}", a.name, b.name));

    let (left, right) = side_tags(a, b);
    tag_into(&mut result, a, &left, &format!("From {}", a.name));
    tag_into(&mut result, b, &right, &format!("From {}", b.name));

    log_built("coproduct", &result);
    result
}

fn pair_object(first: &Object, second: &Object) -> Object {
    Object {
        name: format!("({}, {})", first.name, second.name),
        domain: format!("{}×{}", first.domain, second.domain),
        attributes: first
            .attributes
            .iter()
            .chain(second.attributes.iter())
            .cloned()
            .collect(),
        semantic_signature: format!(
            "Pair of [{}] and [{}]",
            first.semantic_signature, second.semantic_signature
        ),
    }
}

/// Product `A × B`: one object per object pair, one morphism per morphism pair
pub fn product(a: &Category, b: &Category, name: Option<&str>) -> Category {
    let name = name
        .map(str::to_string)
        .unwrap_or_else(|| format!("({} × {})", a.name, b.name));
    let mut result = Category::new(name, format!("Product of {} and {}", a.name, b.name));

    for first in a.objects().values() {
        for second in b.objects().values() {
            result.add_object(pair_object(first, second));
        }
    }

    for m1 in a.morphisms().values() {
        for m2 in b.morphisms().values() {
            let source = pair_object(&m1.source, &m2.source);
            let target = pair_object(&m1.target, &m2.target);
            let source = result.object(&source.name).cloned().unwrap_or(source);
            let target = result.object(&target.name).cloned().unwrap_or(target);
            result.add_morphism(
                Morphism::new(
                    format!("({}, {})", m1.name, m2.name),
                    source,
                    target,
                    MorphismType::Structural,
                )
                .with_semantic(format!(
                    "Product morphism: [{}] × [{}]",
                    m1.semantic_description, m2.semantic_description
                )),
            );
        }
    }

    log_built("product", &result);
    result
}

/// Pullback `A ×_C B` along `f: A -> C` and `g: B -> C`
///
/// Emits `⟨a,b⟩` for every pair whose images resolve to the same object name
/// in C. Objects of B are indexed by image name first, so pairs come out in
/// the order of A's objects, then B's.
pub fn pullback(
    a: &Category,
    b: &Category,
    c: &Category,
    f: &Functor,
    g: &Functor,
    name: Option<&str>,
) -> Category {
    let name = name
        .map(str::to_string)
        .unwrap_or_else(|| format!("Pullback({}, {})", a.name, b.name));
    let mut result = Category::new(name, format!("Pullback over {}", c.name));

    let mut by_image: IndexMap<&str, Vec<&Object>> = IndexMap::new();
    for second in b.objects().values() {
        if let Some(image) = g.apply_to_object(second) {
            by_image.entry(image.name.as_str()).or_default().push(second);
        }
    }

    for first in a.objects().values() {
        let Some(image) = f.apply_to_object(first) else {
            continue;
        };
        let Some(partners) = by_image.get(image.name.as_str()) else {
            continue;
        };
        for second in partners {
            result.add_object(Object {
                name: format!("⟨{},{}⟩", first.name, second.name),
                domain: "pullback".to_string(),
                attributes: first
                    .attributes
                    .iter()
                    .chain(second.attributes.iter())
                    .cloned()
                    .collect(),
                semantic_signature: format!(
                    "Pullback element: {} and {} both map to {}",
                    first.name, second.name, image.name
                ),
            });
        }
    }

    log_built("pullback", &result);
    result
}

/// Equivalences `(L.f(c), R.g(c))` for every object of C with both images resolved
pub fn pushout_equivalences(c: &Category, f: &Functor, g: &Functor) -> Vec<(String, String)> {
    c.objects()
        .values()
        .filter_map(|object| {
            let left = f.apply_to_object(object)?;
            let right = g.apply_to_object(object)?;
            Some((format!("L.{}", left.name), format!("R.{}", right.name)))
        })
        .collect()
}

/// Pushout `A +_C B` along `f: C -> A` and `g: C -> B`
///
/// Builds the disjoint union of A (tagged `L.`) and B (tagged `R.`). The
/// identifications induced by C are recorded in the description only; no
/// objects are merged.
pub fn pushout(
    a: &Category,
    b: &Category,
    c: &Category,
    f: &Functor,
    g: &Functor,
    name: Option<&str>,
) -> Category {
    let name = name
        .map(str::to_string)
        .unwrap_or_else(|| format!("Pushout({}, {})", a.name, b.name));
    let mut result = Category::new(name, format!("Pushout from {}", c.name));

    tag_into(&mut result, a, "L", "Left");
    tag_into(&mut result, b, "R", "Right");

    let equivalences = pushout_equivalences(c, f, g)
        .into_iter()
        .map(|(left, right)| format!("({left}, {right})"))
        .collect::<Vec<_>>()
        .join(", ");
    result.description.push_str(&format!("\nEquivalences: [{equivalences}]"));

    log_built("pushout", &result);
    result
}

/// Difference `A - B`
///
/// An object of A survives unless B has an object with the same name and
/// domain. A morphism of A survives when B has no morphism with the same
/// `(source, target, type)` signature and both its endpoints survived.
pub fn difference(a: &Category, b: &Category, name: Option<&str>) -> Category {
    let name = name
        .map(str::to_string)
        .unwrap_or_else(|| format!("({} - {})", a.name, b.name));
    let mut result = Category::new(name, format!("Difference: {} minus {}", a.name, b.name));

    let excluded_objects: HashSet<(&str, &str)> = b.objects().values().map(Object::key).collect();
    let excluded_morphisms: HashSet<(&str, &str, MorphismType)> =
        b.morphisms().values().map(Morphism::signature).collect();

    let mut survivors: HashSet<&str> = HashSet::new();
    for object in a.objects().values() {
        if !excluded_objects.contains(&object.key()) {
            result.add_object(object.clone());
            survivors.insert(object.name.as_str());
        }
    }

    for morphism in a.morphisms().values() {
        if excluded_morphisms.contains(&morphism.signature()) {
            continue;
        }
        if survivors.contains(morphism.source.name.as_str())
            && survivors.contains(morphism.target.name.as_str())
        {
            result.add_morphism(morphism.clone());
        }
    }

    log_built("difference", &result);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn cat1() -> Category {
        let mut c = Category::new("Cat1", "Category 1");
        c.add_object(Object::new("X", "d1")).add_object(Object::new("Y", "d1"));
        c.add_morphism(Morphism::new(
            "f1",
            Object::new("X", "d1"),
            Object::new("Y", "d1"),
            MorphismType::Structural,
        ));
        c
    }

    fn cat2() -> Category {
        let mut c = Category::new("Cat2", "Category 2");
        c.add_object(Object::new("Y", "d2")).add_object(Object::new("Z", "d2"));
        c.add_morphism(Morphism::new(
            "f2",
            Object::new("Y", "d2"),
            Object::new("Z", "d2"),
            MorphismType::Functional,
        ));
        c
    }

    #[test]
    fn test_coproduct_tags_every_name() {
        let result = coproduct(&cat1(), &cat2(), None);
        assert_eq!(result.name, "(Cat1 + Cat2)");
        assert_eq!(result.len_objects(), 4);
        for name in ["Cat1.X", "Cat1.Y", "Cat2.Y", "Cat2.Z"] {
            assert!(result.contains_object(name), "missing {name}");
        }
        assert_eq!(result.len_morphisms(), 2);
        let f1 = result.morphism("Cat1.f1").unwrap();
        assert_eq!(f1.source.name, "Cat1.X");
        assert_eq!(f1.target.name, "Cat1.Y");
        assert_eq!(result.morphism("Cat2.f2").unwrap().morphism_type, MorphismType::Functional);
    }

    #[test]
    fn test_coproduct_with_itself_keeps_both_sides() {
        let a = cat1();
        let result = coproduct(&a, &a, Some("Twice"));
        assert_eq!(result.len_objects(), 2 * a.len_objects());
        assert_eq!(result.len_morphisms(), 2 * a.len_morphisms());
        assert!(result.contains_object("Cat1.X"));
        assert!(result.contains_object("Cat1'.X"));
    }

    #[test]
    fn test_coproduct_keeps_dotted_names_apart() {
        let mut a = Category::new("A", "");
        a.add_object(Object::new("B.X", "d"));
        let mut b = Category::new("A.B", "");
        b.add_object(Object::new("X", "d"));

        let result = coproduct(&a, &b, None);
        assert_eq!(result.len_objects(), 2);
        let names: Vec<&str> = result.objects().keys().map(String::as_str).collect();
        assert_eq!(names, vec!["A.B.X", "A.B'.X"]);
    }

    #[test]
    fn test_coproduct_prime_only_on_clash() {
        let mut a = Category::new("A", "");
        a.add_object(Object::new("X", "d"));
        let mut b = Category::new("A", "");
        b.add_object(Object::new("Y", "d"));

        let result = coproduct(&a, &b, None);
        let names: Vec<&str> = result.objects().keys().map(String::as_str).collect();
        assert_eq!(names, vec!["A.X", "A.Y"]);
    }

    #[test]
    fn test_product_pairs() {
        let result = product(&cat1(), &cat2(), None);
        assert_eq!(result.len_objects(), 4);
        for name in ["(X, Y)", "(X, Z)", "(Y, Y)", "(Y, Z)"] {
            assert!(result.contains_object(name), "missing {name}");
        }
        assert_eq!(result.object("(X, Z)").unwrap().domain, "d1×d2");

        assert_eq!(result.len_morphisms(), 1);
        let pair = result.morphism("(f1, f2)").unwrap();
        assert_eq!(pair.source.name, "(X, Y)");
        assert_eq!(pair.target.name, "(Y, Z)");
        assert_eq!(pair.morphism_type, MorphismType::Structural);
    }

    #[test]
    fn test_product_concatenates_attributes() {
        let mut a = Category::new("A", "");
        a.add_object(Object::new("p", "d").with_attributes(["kg"]));
        let mut b = Category::new("B", "");
        b.add_object(Object::new("q", "e").with_attributes(["co2", "scope1"]));
        let result = product(&a, &b, None);
        assert_eq!(
            result.object("(p, q)").unwrap().attributes,
            vec!["kg".to_string(), "co2".to_string(), "scope1".to_string()]
        );
    }

    #[test]
    fn test_difference_uses_name_and_domain() {
        let result = difference(&cat1(), &cat2(), None);
        assert!(result.contains_object("X"));
        assert!(result.contains_object("Y"));
        assert_eq!(result.len_morphisms(), 1);

        let mut cat3 = Category::new("Cat3", "");
        cat3.add_object(Object::new("Y", "d1"));
        let result = difference(&cat1(), &cat3, None);
        assert!(result.contains_object("X"));
        assert!(!result.contains_object("Y"));
        // f1 lost its target
        assert_eq!(result.len_morphisms(), 0);
    }

    #[test]
    fn test_difference_drops_matching_signatures() {
        let mut other = Category::new("Other", "");
        other.add_morphism(Morphism::new(
            "renamed",
            Object::new("X", "elsewhere"),
            Object::new("Y", "elsewhere"),
            MorphismType::Structural,
        ));
        let result = difference(&cat1(), &other, None);
        assert_eq!(result.len_objects(), 2);
        assert_eq!(result.len_morphisms(), 0);
    }

    fn span() -> (Arc<Category>, Arc<Category>, Arc<Category>, Functor, Functor) {
        let mut a = Category::new("A", "");
        a.add_object(Object::new("CO2Emission", "emission").with_attributes(["scope1"]))
            .add_object(Object::new("NaturalGas", "energy"))
            .add_object(Object::new("Boiler", "equipment"));
        let mut b = Category::new("B", "");
        b.add_object(Object::new("CO2Indirect", "emission").with_attributes(["scope2"]))
            .add_object(Object::new("Electricity", "energy"));
        let mut c = Category::new("C", "");
        c.add_object(Object::new("Emission", "report"))
            .add_object(Object::new("Energy", "report"));

        let (a, b, c) = (Arc::new(a), Arc::new(b), Arc::new(c));
        let f = Functor::new("F", Arc::clone(&a), Arc::clone(&c))
            .map_object("CO2Emission", "Emission")
            .map_object("NaturalGas", "Energy")
            .map_object("Boiler", "Missing");
        let g = Functor::new("G", Arc::clone(&b), Arc::clone(&c))
            .map_object("CO2Indirect", "Emission")
            .map_object("Electricity", "Energy");
        (a, b, c, f, g)
    }

    #[test]
    fn test_pullback_pairs_equal_images() {
        let (a, b, c, f, g) = span();
        let result = pullback(&a, &b, &c, &f, &g, None);
        assert_eq!(result.name, "Pullback(A, B)");
        let names: Vec<&str> = result.objects().keys().map(String::as_str).collect();
        assert_eq!(names, vec!["⟨CO2Emission,CO2Indirect⟩", "⟨NaturalGas,Electricity⟩"]);

        let pair = result.object("⟨CO2Emission,CO2Indirect⟩").unwrap();
        assert_eq!(pair.domain, "pullback");
        assert_eq!(pair.attributes, vec!["scope1".to_string(), "scope2".to_string()]);
    }

    #[test]
    fn test_pullback_matches_image_names_across_categories() {
        let mut c1 = Category::new("C1", "");
        c1.add_object(Object::new("E", "d1"));
        let mut c2 = Category::new("C2", "");
        c2.add_object(Object::new("E", "d2"));
        let mut a = Category::new("A", "");
        a.add_object(Object::new("a1", "d")).add_object(Object::new("a2", "d"));
        let mut b = Category::new("B", "");
        b.add_object(Object::new("b1", "d")).add_object(Object::new("b2", "d"));

        let (a, b) = (Arc::new(a), Arc::new(b));
        let (c1, c2) = (Arc::new(c1), Arc::new(c2));
        let f = Functor::new("F", Arc::clone(&a), Arc::clone(&c1))
            .map_object("a1", "E")
            .map_object("a2", "E");
        let g = Functor::new("G", Arc::clone(&b), Arc::clone(&c2))
            .map_object("b1", "E")
            .map_object("b2", "E");

        // the two images differ as objects and agree by name
        assert_ne!(
            f.apply_to_object(a.object("a1").unwrap()),
            g.apply_to_object(b.object("b1").unwrap())
        );

        let result = pullback(&a, &b, &c1, &f, &g, None);
        let names: Vec<&str> = result.objects().keys().map(String::as_str).collect();
        assert_eq!(names, vec!["⟨a1,b1⟩", "⟨a1,b2⟩", "⟨a2,b1⟩", "⟨a2,b2⟩"]);
    }

    #[test]
    fn test_pushout_skips_unresolved_equivalences() {
        let mut common = Category::new("C", "");
        common.add_object(Object::new("s", "d")).add_object(Object::new("t", "d"));
        let mut left = Category::new("Left", "");
        left.add_object(Object::new("l", "d"));
        let mut right = Category::new("Right", "");
        right.add_object(Object::new("r", "d"));

        let common = Arc::new(common);
        let (left, right) = (Arc::new(left), Arc::new(right));
        let f = Functor::new("F", Arc::clone(&common), Arc::clone(&left))
            .map_object("s", "l")
            .map_object("t", "l");
        let g = Functor::new("G", Arc::clone(&common), Arc::clone(&right))
            .map_object("s", "r")
            .map_object("t", "absent");

        let result = pushout(&left, &right, &common, &f, &g, None);
        assert_eq!(result.description, "Pushout from C\nEquivalences: [(L.l, R.r)]");
        assert_eq!(pushout_equivalences(&common, &f, &g).len(), 1);
    }

    #[test]
    fn test_pushout_records_equivalences() {
        let mut common = Category::new("Shared", "");
        common.add_object(Object::new("s", "d"));
        let mut left = Category::new("Left", "");
        left.add_object(Object::new("l", "d"));
        left.add_morphism(Morphism::new(
            "lm",
            Object::new("l", "d"),
            Object::new("l2", "d"),
            MorphismType::Causal,
        ));
        let mut right = Category::new("Right", "");
        right.add_object(Object::new("r", "d"));

        let common = Arc::new(common);
        let (left, right) = (Arc::new(left), Arc::new(right));
        let f = Functor::new("F", Arc::clone(&common), Arc::clone(&left)).map_object("s", "l");
        let g = Functor::new("G", Arc::clone(&common), Arc::clone(&right)).map_object("s", "r");

        let result = pushout(&left, &right, &common, &f, &g, Some("Merged"));
        assert_eq!(result.name, "Merged");
        assert_eq!(result.len_objects(), 3);
        assert!(result.contains_object("L.l"));
        assert!(result.contains_object("L.l2"));
        assert!(result.contains_object("R.r"));
        assert!(result.morphism("L.lm").is_some());
        assert_eq!(
            result.description,
            "Pushout from Shared\nEquivalences: [(L.l, R.r)]"
        );
        assert_eq!(
            pushout_equivalences(&common, &f, &g),
            vec![("L.l".to_string(), "R.r".to_string())]
        );
    }
}
