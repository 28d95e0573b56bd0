//! The `/debug` exercise document: one of every construct the renderer
//! knows, for eyeballing the pipeline without a model attached.

pub const DEBUG_DOCUMENT: &str = r#"<think>
So the user wants to see every markdown construct at once.
Let me lay them out in order, blocks first, inline styles after.
</think>

# Header 1
## Header 2
### Header 3
#### **Header 4**
##### Header 5

> paragraph 1

```rust
fn main() {
    println!("hello");
}
```

```bash
cargo new demo
```


```bash
cargo new demo
cargo run
```

---

Just some **text** with more **bold** words
and an inline [search](https://duckduckgo.com) link
plus `inline code` and a [literal] bracket

*italic*

- test
- test2
- test3
- test4

> paragraph multiline
> multiline


- Here some code:
  ```python
  x = 1
  ```
- Test"#;
