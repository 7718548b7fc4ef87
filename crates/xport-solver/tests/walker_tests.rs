use super::*;
use xport_model::{ClassFlags, ClassModel, ClassModelBuilder, Variance, display_types};

const EXPLICIT: ClassFlags = ClassFlags::EXPLICIT_EXPORT;
const IMPLICIT: ClassFlags = ClassFlags::IMPLICIT_EXPORT;
const NONE: ClassFlags = ClassFlags::empty();

fn walk(model: &ClassModel, ty: &TypeRef) -> String {
    let set = HierarchyWalker::new(model).walk(ty, &SubstitutionMap::new());
    display_types(model, set.iter()).to_string()
}

#[test]
fn test_builtin_and_stdlib_contribute_nothing() {
    let mut b = ClassModel::builder();
    let int = b.declare_class("Int", ClassFlags::BUILT_IN | EXPLICIT);
    let (list, _) = b.declare_generic_class("List", ClassFlags::STANDARD_LIBRARY, &["E"]);
    let model = b.finish().unwrap();

    assert_eq!(walk(&model, &TypeRef::simple(int)), "{}");
    let list_of_int = TypeRef::class(list, vec![TypeRef::simple(int).into()]);
    assert_eq!(walk(&model, &list_of_int), "{}");
}

#[test]
fn test_exported_leaf_stops_walk() {
    let mut b = ClassModel::builder();
    let base = b.declare_class("Base", EXPLICIT);
    let foo = b.declare_class("Foo", EXPLICIT);
    b.add_supertype(foo, TypeRef::simple(base));
    let model = b.finish().unwrap();

    assert_eq!(walk(&model, &TypeRef::simple(foo)), "{Foo}");
    assert_eq!(
        walk(&model, &TypeRef::simple(foo).with_nullable(true)),
        "{Foo?}"
    );
}

#[test]
fn test_exported_generic_entry_keeps_arguments() {
    let mut b = ClassModel::builder();
    let int = b.declare_class("Int", ClassFlags::BUILT_IN);
    let (boxed, _) = b.declare_generic_class("Box", EXPLICIT, &["T"]);
    let model = b.finish().unwrap();

    let ty = TypeRef::class(boxed, vec![TypeRef::simple(int).into()]);
    assert_eq!(walk(&model, &ty), "{Box<Int>}");
}

#[test]
fn test_non_exported_classes_are_transparent() {
    // Leaf : Mid<Int>, Mid<T> : Top<List<T>>
    let mut b = ClassModel::builder();
    let int = b.declare_class("Int", ClassFlags::BUILT_IN);
    let (list, _) = b.declare_generic_class("List", ClassFlags::STANDARD_LIBRARY, &["E"]);
    let (top, _) = b.declare_generic_class("Top", EXPLICIT, &["X"]);
    let (mid, mid_params) = b.declare_generic_class("Mid", NONE, &["T"]);
    let leaf = b.declare_class("Leaf", NONE);
    b.add_supertype(
        mid,
        TypeRef::class(
            top,
            vec![TypeRef::class(list, vec![TypeRef::param(mid_params[0]).into()]).into()],
        ),
    );
    b.add_supertype(leaf, TypeRef::class(mid, vec![TypeRef::simple(int).into()]));
    let model = b.finish().unwrap();

    assert_eq!(walk(&model, &TypeRef::simple(leaf)), "{Top<List<Int>>}");
}

#[test]
fn test_projection_survives_substitution() {
    let mut b = ClassModel::builder();
    let string = b.declare_class("String", ClassFlags::BUILT_IN);
    let (top, _) = b.declare_generic_class("Top", EXPLICIT, &["X"]);
    let (mid, params) = b.declare_generic_class("Mid", NONE, &["T"]);
    b.add_supertype(
        mid,
        TypeRef::class(
            top,
            vec![TypeArgument::projection(Variance::Out, TypeRef::param(params[0]))],
        ),
    );
    let model = b.finish().unwrap();

    let mid_of_string = TypeRef::class(mid, vec![TypeRef::simple(string).into()]);
    assert_eq!(walk(&model, &mid_of_string), "{Top<out String>}");

    let mid_of_star = TypeRef::class(mid, vec![TypeArgument::Star]);
    assert_eq!(walk(&model, &mid_of_star), "{Top<*>}");
}

#[test]
fn test_implicit_export_surfaces_explicit_ancestor() {
    let mut b = ClassModel::builder();
    let base = b.declare_class("Base", EXPLICIT);
    let imp = b.declare_class("Impl", IMPLICIT);
    b.add_supertype(imp, TypeRef::simple(base));
    let model = b.finish().unwrap();

    assert_eq!(walk(&model, &TypeRef::simple(imp)), "{Impl, Base}");
}

#[test]
fn test_implicit_interface_does_not_surface_ancestor() {
    let mut b = ClassModel::builder();
    let base = b.declare_class("Base", EXPLICIT);
    let iface = b.declare_class("Shape", ClassFlags::INTERFACE | IMPLICIT);
    b.add_supertype(iface, TypeRef::simple(base));
    let model = b.finish().unwrap();

    assert_eq!(walk(&model, &TypeRef::simple(iface)), "{Shape}");
}

#[test]
fn test_explicitly_marked_class_skips_ancestor_search() {
    // Explicit marking wins over the implicit side effect.
    let mut b = ClassModel::builder();
    let base = b.declare_class("Base", EXPLICIT);
    let both = b.declare_class("Both", EXPLICIT | IMPLICIT);
    b.add_supertype(both, TypeRef::simple(base));
    let model = b.finish().unwrap();

    assert_eq!(walk(&model, &TypeRef::simple(both)), "{Both}");
}

#[test]
fn test_implicit_without_explicit_ancestor() {
    let mut b = ClassModel::builder();
    let any = b.declare_class("Any", ClassFlags::BUILT_IN);
    let hidden = b.declare_class("Hidden", NONE);
    let imp = b.declare_class("Impl", IMPLICIT);
    b.add_supertype(hidden, TypeRef::simple(any));
    b.add_supertype(imp, TypeRef::simple(hidden));
    let model = b.finish().unwrap();

    assert_eq!(walk(&model, &TypeRef::simple(imp)), "{Impl}");
}

#[test]
fn test_ancestor_search_is_first_found() {
    // Impl : Mid, B; Mid : A. The search finds A through Mid and never looks at B.
    let mut b = ClassModel::builder();
    let a = b.declare_class("A", EXPLICIT);
    let b_class = b.declare_class("B", EXPLICIT);
    let mid = b.declare_class("Mid", NONE);
    let imp = b.declare_class("Impl", IMPLICIT);
    b.add_supertype(mid, TypeRef::simple(a));
    b.add_supertype(imp, TypeRef::simple(mid));
    b.add_supertype(imp, TypeRef::simple(b_class));
    let model = b.finish().unwrap();

    assert_eq!(walk(&model, &TypeRef::simple(imp)), "{Impl, A}");
}

#[test]
fn test_ancestor_search_substitutes_per_level() {
    // Impl<T> : Mid<List<T>>, Mid<Y> : Base<Y>
    let mut b = ClassModel::builder();
    let int = b.declare_class("Int", ClassFlags::BUILT_IN);
    let (list, _) = b.declare_generic_class("List", ClassFlags::STANDARD_LIBRARY, &["E"]);
    let (base, _) = b.declare_generic_class("Base", EXPLICIT, &["X"]);
    let (mid, mid_params) = b.declare_generic_class("Mid", NONE, &["Y"]);
    let (imp, imp_params) = b.declare_generic_class("Impl", IMPLICIT, &["T"]);
    b.add_supertype(
        mid,
        TypeRef::class(base, vec![TypeRef::param(mid_params[0]).into()]),
    );
    b.add_supertype(
        imp,
        TypeRef::class(
            mid,
            vec![TypeRef::class(list, vec![TypeRef::param(imp_params[0]).into()]).into()],
        ),
    );
    let model = b.finish().unwrap();

    let impl_of_int = TypeRef::class(imp, vec![TypeRef::simple(int).into()]);
    assert_eq!(
        walk(&model, &impl_of_int),
        "{Impl<Int>, Base<List<Int>>}"
    );
}

#[test]
fn test_diamond_is_deduplicated() {
    let mut b = ClassModel::builder();
    let top = b.declare_class("Top", EXPLICIT);
    let left = b.declare_class("Left", NONE);
    let right = b.declare_class("Right", ClassFlags::INTERFACE);
    let bottom = b.declare_class("Bottom", NONE);
    b.add_supertype(left, TypeRef::simple(top));
    b.add_supertype(right, TypeRef::simple(top));
    b.add_supertype(bottom, TypeRef::simple(left));
    b.add_supertype(bottom, TypeRef::simple(right));
    let model = b.finish().unwrap();

    assert_eq!(walk(&model, &TypeRef::simple(bottom)), "{Top}");
}

#[test]
fn test_results_follow_declaration_order() {
    let mut b = ClassModel::builder();
    let first = b.declare_class("First", EXPLICIT);
    let second = b.declare_class("Second", ClassFlags::INTERFACE | EXPLICIT);
    let leaf = b.declare_class("Leaf", NONE);
    b.add_supertype(leaf, TypeRef::simple(second));
    b.add_supertype(leaf, TypeRef::simple(first));
    let model = b.finish().unwrap();

    assert_eq!(walk(&model, &TypeRef::simple(leaf)), "{Second, First}");
}

#[test]
fn test_stdlib_and_unresolved_supertypes_are_skipped() {
    let mut b = ClassModel::builder();
    let int = b.declare_class("Int", ClassFlags::BUILT_IN);
    let (list, _) = b.declare_generic_class("List", ClassFlags::STANDARD_LIBRARY, &["E"]);
    let top = b.declare_class("Top", EXPLICIT);
    let leaf = b.declare_class("Leaf", NONE);
    let external = b.intern("ext.Thing");
    b.add_supertype(leaf, TypeRef::class(list, vec![TypeRef::simple(int).into()]));
    b.add_supertype(leaf, TypeRef::unresolved(external, Vec::new()));
    b.add_supertype(leaf, TypeRef::simple(top));
    let model = b.finish().unwrap();

    assert_eq!(walk(&model, &TypeRef::simple(leaf)), "{Top}");
}

#[test]
fn test_non_class_entry_types_yield_empty() {
    let mut b = ClassModel::builder();
    let (_, params) = b.declare_generic_class("Holder", EXPLICIT, &["T"]);
    let external = b.intern("ext.Thing");
    let model = b.finish().unwrap();

    assert_eq!(walk(&model, &TypeRef::param(params[0])), "{}");
    assert_eq!(
        walk(&model, &TypeRef::unresolved(external, Vec::new())),
        "{}"
    );
}

#[test]
fn test_walker_is_reusable() {
    let mut b = ClassModel::builder();
    let top = b.declare_class("Top", EXPLICIT);
    let leaf = b.declare_class("Leaf", NONE);
    b.add_supertype(leaf, TypeRef::simple(top));
    let model = b.finish().unwrap();

    let mut walker = HierarchyWalker::new(&model);
    let first = walker.walk(&TypeRef::simple(leaf), &SubstitutionMap::new());
    let second = walker.walk(&TypeRef::simple(leaf), &SubstitutionMap::new());
    assert_eq!(first, second);
    assert_eq!(first.len(), 1);
}

#[test]
#[should_panic(expected = "inheritance cycle through class `A` while walking the export hierarchy")]
fn test_cycle_in_walk_panics() {
    let mut b = ClassModel::builder();
    let a = b.declare_class("A", NONE);
    let b_class = b.declare_class("B", NONE);
    b.add_supertype(a, TypeRef::simple(b_class));
    b.add_supertype(b_class, TypeRef::simple(a));
    let model = b.finish_unchecked();

    walk(&model, &TypeRef::simple(a));
}

#[test]
#[should_panic(
    expected = "inheritance cycle through class `X` while searching for an explicitly exported ancestor"
)]
fn test_cycle_in_ancestor_search_panics() {
    let mut b = ClassModel::builder();
    let x = b.declare_class("X", NONE);
    let y = b.declare_class("Y", NONE);
    let imp = b.declare_class("Impl", IMPLICIT);
    b.add_supertype(imp, TypeRef::simple(x));
    b.add_supertype(x, TypeRef::simple(y));
    b.add_supertype(y, TypeRef::simple(x));
    let model = b.finish_unchecked();

    walk(&model, &TypeRef::simple(imp));
}

fn chain(len: usize) -> (ClassModel, TypeRef) {
    // C0 : C1 : ... : C{len}, only the last one exported.
    let mut b = ClassModel::builder();
    let ids: Vec<_> = (0..=len)
        .map(|i| {
            let flags = if i == len { EXPLICIT } else { NONE };
            b.declare_class(&format!("C{i}"), flags)
        })
        .collect();
    for pair in ids.windows(2) {
        b.add_supertype(pair[0], TypeRef::simple(pair[1]));
    }
    let entry = TypeRef::simple(ids[0]);
    (b.finish().unwrap(), entry)
}

#[test]
fn test_deep_chain_within_limits() {
    let (model, entry) = chain(5);
    let mut walker = HierarchyWalker::with_profiles(
        &model,
        RecursionProfile::Custom {
            max_depth: 10,
            max_iterations: 100,
        },
        RecursionProfile::AncestorSearch,
    );
    let set = walker.walk(&entry, &SubstitutionMap::new());
    assert_eq!(display_types(&model, set.iter()).to_string(), "{C5}");
}

#[test]
#[should_panic(expected = "class hierarchy deeper than 3 levels at `C3`")]
fn test_depth_limit_panics() {
    let (model, entry) = chain(5);
    let mut walker = HierarchyWalker::with_profiles(
        &model,
        RecursionProfile::Custom {
            max_depth: 3,
            max_iterations: 100,
        },
        RecursionProfile::AncestorSearch,
    );
    walker.walk(&entry, &SubstitutionMap::new());
}

/// `levels` diamonds stacked on top of each other:
///
/// ```text
/// D{i} : L{i}, R{i}
/// L{i} : D{i+1}
/// R{i} : D{i+1}
/// ```
///
/// `D{levels}` inherits from `Top` when `top` is set. Every class below `Top`
/// is unexported, and there are `2^levels` paths from `D0` to the bottom.
fn stacked_diamonds(b: &mut ClassModelBuilder, levels: usize, top: bool) -> ClassId {
    let ds: Vec<_> = (0..=levels)
        .map(|i| b.declare_class(&format!("D{i}"), NONE))
        .collect();
    for i in 0..levels {
        let left = b.declare_class(&format!("L{i}"), NONE);
        let right = b.declare_class(&format!("R{i}"), NONE);
        b.add_supertype(ds[i], TypeRef::simple(left));
        b.add_supertype(ds[i], TypeRef::simple(right));
        b.add_supertype(left, TypeRef::simple(ds[i + 1]));
        b.add_supertype(right, TypeRef::simple(ds[i + 1]));
    }
    if top {
        let top = b.declare_class("Top", EXPLICIT);
        b.add_supertype(ds[levels], TypeRef::simple(top));
    }
    ds[0]
}

#[test]
fn test_stacked_diamonds_walk_each_class_once() {
    let mut b = ClassModel::builder();
    let entry = stacked_diamonds(&mut b, 21, true);
    let model = b.finish().unwrap();

    assert_eq!(walk(&model, &TypeRef::simple(entry)), "{Top}");

    // 21 * (D, L, R) + the bottom D21: every class entered exactly once.
    let mut walker = HierarchyWalker::with_profiles(
        &model,
        RecursionProfile::Custom {
            max_depth: 64,
            max_iterations: 64,
        },
        RecursionProfile::AncestorSearch,
    );
    let set = walker.walk(&TypeRef::simple(entry), &SubstitutionMap::new());
    assert_eq!(display_types(&model, set.iter()).to_string(), "{Top}");
}

#[test]
fn test_ancestor_search_over_stacked_diamonds_visits_each_class_once() {
    let mut b = ClassModel::builder();
    let entry = stacked_diamonds(&mut b, 21, false);
    let imp = b.declare_class("Impl", IMPLICIT);
    b.add_supertype(imp, TypeRef::simple(entry));
    let model = b.finish().unwrap();

    // Impl plus the 64 classes below it; a miss is remembered per class.
    let mut walker = HierarchyWalker::with_profiles(
        &model,
        RecursionProfile::HierarchyWalk,
        RecursionProfile::Custom {
            max_depth: 64,
            max_iterations: 65,
        },
    );
    let set = walker.walk(&TypeRef::simple(imp), &SubstitutionMap::new());
    assert_eq!(display_types(&model, set.iter()).to_string(), "{Impl}");
}

#[test]
fn test_memoized_classes_keep_arguments_apart() {
    // Leaf : Mid<Int>, Mid<String>, Other; Other : Mid<Int>; Mid<T> : Top<T>
    let mut b = ClassModel::builder();
    let int = b.declare_class("Int", ClassFlags::BUILT_IN);
    let string = b.declare_class("String", ClassFlags::BUILT_IN);
    let (top, _) = b.declare_generic_class("Top", EXPLICIT, &["X"]);
    let (mid, params) = b.declare_generic_class("Mid", NONE, &["T"]);
    let other = b.declare_class("Other", NONE);
    let leaf = b.declare_class("Leaf", NONE);
    b.add_supertype(
        mid,
        TypeRef::class(top, vec![TypeRef::param(params[0]).into()]),
    );
    let mid_of = |ty: ClassId| TypeRef::class(mid, vec![TypeRef::simple(ty).into()]);
    b.add_supertype(other, mid_of(int));
    b.add_supertype(leaf, mid_of(int));
    b.add_supertype(leaf, mid_of(string));
    b.add_supertype(leaf, TypeRef::simple(other));
    let model = b.finish().unwrap();

    assert_eq!(
        walk(&model, &TypeRef::simple(leaf)),
        "{Top<Int>, Top<String>}"
    );
    assert_eq!(walk(&model, &TypeRef::simple(other)), "{Top<Int>}");
}
